//! Authentication.
//!
//! A fixed demo directory of two accounts backs login: the owner and one
//! staff member. Any non-empty password is accepted as long as the email
//! and requested role match the directory entry. Successful logins mint an
//! opaque bearer token held in memory for the life of the process.

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use tokio::sync::RwLock;

use washlytics_core::{Email, Role, User};

/// Errors returned by the authentication service.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Email, password, or role did not match a directory entry.
    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Holds the account directory and the live session tokens.
pub struct AuthService {
    directory: Vec<User>,
    sessions: RwLock<HashMap<String, User>>,
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthService {
    /// Build the service with the demo account directory.
    ///
    /// # Panics
    ///
    /// Never panics; the directory emails are valid by construction.
    #[must_use]
    pub fn new() -> Self {
        #[allow(clippy::unwrap_used)]
        let directory = vec![
            User {
                id: "owner-001".into(),
                username: "App Owner".to_owned(),
                email: Email::parse("owner@washlytics.com").unwrap(),
                role: Role::Owner,
            },
            User {
                id: "staff-001".into(),
                username: "Staff Member".to_owned(),
                email: Email::parse("staff@washlytics.com").unwrap(),
                role: Role::Staff,
            },
        ];

        Self {
            directory,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Authenticate and mint a session token.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` when the password is empty or no
    /// directory entry matches both the email and the requested role. The
    /// failure reason is never distinguished in the error.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<(User, String), AuthError> {
        if password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .directory
            .iter()
            .find(|u| u.email.as_ref().eq_ignore_ascii_case(email) && u.role == role)
            .cloned()
            .ok_or(AuthError::InvalidCredentials)?;

        let token = generate_token();
        self.sessions
            .write()
            .await
            .insert(token.clone(), user.clone());

        tracing::info!(user = %user.id, role = %user.role, "login succeeded");
        Ok((user, token))
    }

    /// Resolve a bearer token to its user, if the session is live.
    pub async fn resolve(&self, token: &str) -> Option<User> {
        self.sessions.read().await.get(token).cloned()
    }

    /// Invalidate a session token. Unknown tokens are a no-op.
    pub async fn logout(&self, token: &str) {
        if let Some(user) = self.sessions.write().await.remove(token) {
            tracing::info!(user = %user.id, "session ended");
        }
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
