//! Service catalog handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use washlytics_core::validate::ServiceForm;
use washlytics_core::{Service, ServiceId};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// List the service catalog.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Json<Vec<Service>> {
    Json(state.cache().services().await)
}

/// Add a service to the catalog.
///
/// # Errors
///
/// Returns 422 on validation failure or 403 for non-owners.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(form): Json<ServiceForm>,
) -> Result<(StatusCode, Json<Service>)> {
    form.validate()?;
    let service = state.cache().add_service(&user, form).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// Update a catalog service.
///
/// # Errors
///
/// Returns 422 on validation failure, 403 for non-owners, or 404 for an
/// unknown ID.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
    Json(form): Json<ServiceForm>,
) -> Result<Json<Service>> {
    form.validate()?;
    let service = state
        .cache()
        .update_service(&user, &ServiceId::new(id), form)
        .await?;
    Ok(Json(service))
}

/// Remove a service from the catalog.
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
        .delete_service(&user, &ServiceId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
