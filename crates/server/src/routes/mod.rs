//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Health check
//!
//! # Auth
//! POST /auth/login                     - Exchange credentials for a token
//! POST /auth/logout                    - End the current session
//!
//! # Wash records (requires auth)
//! GET    /api/washes                   - List wash records, newest first
//! POST   /api/washes                   - Record a wash
//! PUT    /api/washes/{id}              - Edit a wash (owner)
//! DELETE /api/washes/{id}              - Delete a wash (owner)
//!
//! # Service catalog (requires auth)
//! GET    /api/services                 - List services
//! POST   /api/services                 - Add a service (owner)
//! PUT    /api/services/{id}            - Update a service (owner)
//! DELETE /api/services/{id}            - Delete a service (owner)
//!
//! # Billing change requests (requires auth)
//! GET  /api/billing-requests           - List requests
//! POST /api/billing-requests           - File a request (staff)
//! POST /api/billing-requests/{id}/status - Approve or reject (owner)
//!
//! # Notifications (requires auth, scoped to the viewer)
//! GET  /api/notifications              - Visible notifications, newest first
//! GET  /api/notifications/unread-count - Unread badge count
//! POST /api/notifications/{id}/read    - Mark one as read
//! POST /api/notifications/read-all     - Mark all visible as read
//!
//! # Analytics (requires auth)
//! GET  /api/analytics?range=7d|30d|all - Aggregated dashboard series
//!
//! # Suggestions (requires auth)
//! POST /api/suggest                    - Model-picked services for a car
//! ```

pub mod analytics;
pub mod auth;
pub mod billing;
pub mod notifications;
pub mod services;
pub mod suggest;
pub mod washes;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the wash record routes router.
pub fn wash_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(washes::list).post(washes::create))
        .route("/{id}", axum::routing::put(washes::update).delete(washes::delete))
}

/// Create the service catalog routes router.
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(services::list).post(services::create))
        .route(
            "/{id}",
            axum::routing::put(services::update).delete(services::delete),
        )
}

/// Create the billing change request routes router.
pub fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(billing::list).post(billing::create))
        .route("/{id}/status", post(billing::set_status))
}

/// Create the notification routes router.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list))
        .route("/unread-count", get(notifications::unread_count))
        .route("/{id}/read", post(notifications::mark_read))
        .route("/read-all", post(notifications::mark_all_read))
}

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", auth_routes())
        .nest("/api/washes", wash_routes())
        .nest("/api/services", service_routes())
        .nest("/api/billing-requests", billing_routes())
        .nest("/api/notifications", notification_routes())
        .route("/api/analytics", get(analytics::dashboard))
        .route("/api/suggest", post(suggest::suggest))
}

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}
