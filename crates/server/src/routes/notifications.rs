//! Notification handlers. Everything here is scoped to the viewer.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use washlytics_core::{Notification, NotificationId};

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// The viewer's notifications, newest first.
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Json<Vec<Notification>> {
    Json(state.cache().notifications_for(&user).await)
}

/// Unread badge count for the viewer.
pub async fn unread_count(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Json<serde_json::Value> {
    let count = state.cache().unread_count(&user).await;
    Json(json!({ "unreadCount": count }))
}

/// Mark one of the viewer's notifications as read.
///
/// # Errors
///
/// Returns 404 when no notification visible to the viewer has this ID.
pub async fn mark_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<String>,
) -> Result<Json<Notification>> {
    let notification = state
        .cache()
        .mark_notification_read(&user, &NotificationId::new(id))
        .await?;
    Ok(Json(notification))
}

/// Mark every notification the viewer can see as read.
///
/// # Errors
///
/// Returns 500 if the store write fails.
pub async fn mark_all_read(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<serde_json::Value>> {
    let marked = state.cache().mark_all_read(&user).await?;
    Ok(Json(json!({ "marked": marked })))
}
