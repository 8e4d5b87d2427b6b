//! Wash record handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use washlytics_core::validate::{EditWashForm, WashForm};
use washlytics_core::{WashId, WashRecord};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// List every wash record, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Json<Vec<WashRecord>> {
    Json(state.cache().wash_records().await)
}

/// Record a new wash.
///
/// # Errors
///
/// Returns 422 on validation failure or 500 if the store write fails.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(form): Json<WashForm>,
) -> Result<(StatusCode, Json<WashRecord>)> {
    form.validate()?;
    let record = state.cache().add_wash_record(&user, form).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Apply an owner edit, including a discount.
///
/// # Errors
///
/// Returns 422 on validation failure, 403 for non-owners, or 404 for an
/// unknown ID.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(form): Json<EditWashForm>,
) -> Result<Json<WashRecord>> {
    form.validate()?;
    let record = state
        .cache()
        .update_wash_record(&user, &WashId::new(id), form)
        .await?;
    Ok(Json(record))
}

/// Delete a wash record.
///
/// # Errors
///
/// Returns 403 for non-owners or 404 for an unknown ID.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state
        .cache()
        .delete_wash_record(&user, &WashId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
