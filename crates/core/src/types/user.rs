//! User accounts.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::role::Role;

/// An authenticated account.
///
/// Set at login and carried with every gated operation as the acting user.
/// The session token itself lives in the server's session map, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Email,
    pub role: Role,
}

impl User {
    /// Whether this user holds the given role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}
