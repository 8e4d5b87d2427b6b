//! Login and logout handlers.

use axum::{Json, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};

use washlytics_core::{Role, User};

use crate::error::Result;
use crate::middleware::bearer_token;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

/// Exchange credentials for a bearer token.
///
/// # Errors
///
/// Returns 401 when the credentials do not match a directory entry.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let (user, token) = state
        .auth()
        .login(&request.email, &request.password, request.role)
        .await?;

    Ok(Json(LoginResponse { user, token }))
}

/// End the current session. Succeeds even without a valid token so logout
/// is always safe to call.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    if let Some(token) = bearer_token(&headers) {
        state.auth().logout(&token).await;
    }
    Json(serde_json::json!({ "ok": true }))
}
