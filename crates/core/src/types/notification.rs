//! Notification records and recipient matching.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{NotificationId, UserId};
use super::role::Role;
use super::user::User;

/// A message delivered to one user or broadcast to a whole role.
///
/// Delivery is decided at read time: a notification is visible to a viewer
/// if `user_id` matches the viewer's ID or `role_target` matches the
/// viewer's role. A record carrying neither target is visible to nobody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_target: Option<Role>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_record_id: Option<String>,
}

impl Notification {
    /// Whether this notification is delivered to the given viewer.
    #[must_use]
    pub fn visible_to(&self, viewer: &User) -> bool {
        self.user_id.as_ref() == Some(&viewer.id)
            || self.role_target == Some(viewer.role)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::types::Email;

    use super::*;

    fn viewer(id: &str, role: Role) -> User {
        User {
            id: UserId::new(id),
            username: id.to_owned(),
            email: Email::parse("viewer@washlytics.com").unwrap(),
            role,
        }
    }

    fn notification(user_id: Option<&str>, role_target: Option<Role>) -> Notification {
        Notification {
            id: NotificationId::new("NTF-1"),
            user_id: user_id.map(UserId::new),
            role_target,
            message: "test".to_owned(),
            timestamp: Utc::now(),
            read: false,
            link: None,
            related_record_id: None,
        }
    }

    #[test]
    fn test_direct_target_visible_regardless_of_role() {
        let n = notification(Some("staff-001"), None);
        assert!(n.visible_to(&viewer("staff-001", Role::Staff)));
        assert!(n.visible_to(&viewer("staff-001", Role::Owner)));
        assert!(!n.visible_to(&viewer("staff-002", Role::Staff)));
    }

    #[test]
    fn test_role_target_broadcasts_to_whole_role() {
        let n = notification(None, Some(Role::Owner));
        assert!(n.visible_to(&viewer("owner-001", Role::Owner)));
        assert!(n.visible_to(&viewer("owner-002", Role::Owner)));
        assert!(!n.visible_to(&viewer("staff-001", Role::Staff)));
    }

    #[test]
    fn test_untargeted_notification_is_invisible() {
        let n = notification(None, None);
        assert!(!n.visible_to(&viewer("owner-001", Role::Owner)));
        assert!(!n.visible_to(&viewer("staff-001", Role::Staff)));
    }
}
