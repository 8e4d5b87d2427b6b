//! Billing change requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{RequestId, UserId, WashId};

/// Lifecycle state of a billing change request.
///
/// `Approved` and `Rejected` are terminal; there is no path back to
/// `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    /// Stable string form used in notification messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether a transition from `self` to `next` is allowed.
    ///
    /// Only `Pending` requests can move, and only to a terminal state.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == Self::Pending && matches!(next, Self::Approved | Self::Rejected)
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staff-initiated appeal to modify a past wash record's billing.
///
/// `wash_id` is an advisory reference only; it is not checked against the
/// wash collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingChangeRequest {
    pub id: RequestId,
    pub wash_id: WashId,
    pub staff_id: UserId,
    pub staff_name: String,
    pub request_details: String,
    pub requested_at: DateTime<Utc>,
    pub status: RequestStatus,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Approved));
        assert!(RequestStatus::Pending.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Pending.can_transition_to(RequestStatus::Pending));
        assert!(!RequestStatus::Approved.can_transition_to(RequestStatus::Rejected));
        assert!(!RequestStatus::Rejected.can_transition_to(RequestStatus::Pending));
    }

    #[test]
    fn test_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::Approved).unwrap(),
            "\"approved\""
        );
    }
}
