//! Account roles and the permissions they carry.

use serde::{Deserialize, Serialize};

/// Role attached to every account.
///
/// Owners manage the service catalog, edit and delete wash records, and
/// resolve billing change requests. Staff record washes and file billing
/// change requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Staff,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Self; 2] = [Self::Owner, Self::Staff];

    /// Stable string form used in logs and notification targeting.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Staff => "staff",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "staff" => Ok(Self::Staff),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}
