//! Authentication extractors.
//!
//! Provides an extractor for requiring a logged-in user in route handlers.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use washlytics_core::User;

use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// Resolves the `Authorization: Bearer <token>` header against the live
/// sessions; rejects with 401 otherwise.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Error returned when authentication is required but missing or invalid.
pub enum AuthRejection {
    /// No `Authorization: Bearer` header on the request.
    MissingToken,
    /// The token does not resolve to a live session.
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken => "Missing bearer token",
            Self::InvalidToken => "Invalid or expired session",
        };
        (StatusCode::UNAUTHORIZED, Json(json!({ "error": message }))).into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or(AuthRejection::MissingToken)?;

        let user = state
            .auth()
            .resolve(&token)
            .await
            .ok_or(AuthRejection::InvalidToken)?;

        Ok(Self(user))
    }
}

/// Pull the bearer token out of the `Authorization` header, if present.
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}
