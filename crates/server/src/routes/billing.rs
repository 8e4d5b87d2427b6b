//! Billing change request handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use washlytics_core::validate::BillingRequestForm;
use washlytics_core::{BillingChangeRequest, RequestId, RequestStatus};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// List every billing change request.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Json<Vec<BillingChangeRequest>> {
    Json(state.cache().billing_requests().await)
}

/// File a billing change request.
///
/// # Errors
///
/// Returns 422 on validation failure or 403 for non-staff.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(form): Json<BillingRequestForm>,
) -> Result<(StatusCode, Json<BillingChangeRequest>)> {
    form.validate()?;
    let request = state.cache().add_billing_request(&user, form).await?;
    Ok((StatusCode::CREATED, Json(request)))
}

#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    pub status: RequestStatus,
}

/// Approve or reject a pending request.
///
/// # Errors
///
/// Returns 403 for non-owners, 404 for an unknown ID, or 409 when the
/// request is no longer pending.
pub async fn set_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(body): Json<SetStatusRequest>,
) -> Result<Json<BillingChangeRequest>> {
    let request = state
        .cache()
        .update_billing_request_status(&user, &RequestId::new(id), body.status)
        .await?;
    Ok(Json(request))
}
