//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps every layer's errors to an
//! HTTP status and a JSON body. All route handlers should return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use washlytics_core::validate::ValidationError;

use crate::auth::AuthError;
use crate::cache::CacheError;
use crate::store::StoreError;
use crate::suggest::SuggestError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A submitted form failed validation.
    #[error("Validation failed")]
    Validation(#[from] ValidationError),

    /// Authentication failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cache mutation failed.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// The store failed outside a cache mutation.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Service suggestion call failed.
    #[error("Suggestion error: {0}")]
    Suggest(#[from] SuggestError),

    /// Suggestions are not configured for this deployment.
    #[error("Suggestions are not configured")]
    SuggestionsDisabled,

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::Store(_) | Self::Cache(CacheError::Store(_)) | Self::Suggest(_)
        ) {
            tracing::error!(error = %self, "request error");
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Self::Cache(err) => match err {
                CacheError::Denied { .. } => StatusCode::FORBIDDEN,
                CacheError::NotFound(_) => StatusCode::NOT_FOUND,
                CacheError::InvalidTransition { .. } => StatusCode::CONFLICT,
                CacheError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Suggest(_) => StatusCode::BAD_GATEWAY,
            Self::SuggestionsDisabled => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        };

        // Validation errors carry per-field details; everything else gets a
        // single message. Internal details are never exposed to clients.
        let body = match &self {
            Self::Validation(err) => json!({
                "error": "Validation failed",
                "fields": err.errors,
            }),
            Self::Store(_) | Self::Cache(CacheError::Store(_)) => {
                json!({ "error": "Internal server error" })
            }
            Self::Suggest(_) => json!({ "error": "Suggestion service error" }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
