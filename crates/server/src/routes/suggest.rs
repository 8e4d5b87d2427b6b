//! Service suggestion handler.

use axum::{Json, extract::State};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;
use crate::suggest::{Suggestion, SuggestionRequest};

/// Ask the model to pick services for a car.
///
/// # Errors
///
/// Returns 503 when no API key is configured and 502 when the upstream
/// call fails.
pub async fn suggest(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<Suggestion>> {
    let client = state.suggest().ok_or(AppError::SuggestionsDisabled)?;
    let catalog = state.cache().services().await;

    let suggestion = client.suggest(&request, &catalog).await?;
    Ok(Json(suggestion))
}
