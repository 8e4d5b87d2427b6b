//! Service suggestions via the Anthropic Messages API.
//!
//! Given a car's details and the customer's stated preferences, asks the
//! model to pick services from the current catalog and explain the choice.
//! The model is instructed to reply with strict JSON so the response can be
//! deserialized directly.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use washlytics_core::{CarDetails, Service};

use crate::config::SuggestConfig;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1024;

const SYSTEM_PROMPT: &str = "You are an advisor at a car wash. Given a car's \
details, its condition, and the customer's preferences, recommend services \
from the provided catalog. Respond with strict JSON only, no prose and no \
code fences, in this shape: \
{\"suggestedServices\": [\"<service name>\", ...], \"reasoning\": \"<one short paragraph>\"}. \
Only recommend services that appear in the catalog.";

/// Errors from the suggestion client.
#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    /// HTTP transport failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned an error status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("unparseable response: {0}")]
    Parse(String),
}

/// What the caller wants suggestions for.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub car_details: CarDetails,
    pub car_condition_notes: Option<String>,
    pub customer_preferences: Option<String>,
}

/// A suggestion as returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub suggested_services: Vec<String>,
    pub reasoning: String,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<MessageParam>,
}

#[derive(Serialize)]
struct MessageParam {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Anthropic Messages API client scoped to service suggestions.
#[derive(Clone)]
pub struct SuggestClient {
    inner: Arc<SuggestClientInner>,
}

struct SuggestClientInner {
    client: reqwest::Client,
    model: String,
}

impl SuggestClient {
    /// Create a new suggestion client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &SuggestConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key).expect("Invalid API key for header"),
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(SuggestClientInner {
                client,
                model: config.model.clone(),
            }),
        }
    }

    /// Ask for service suggestions against the given catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response cannot be
    /// parsed into a [`Suggestion`].
    #[instrument(skip(self, request, catalog), fields(model = %self.inner.model))]
    pub async fn suggest(
        &self,
        request: &SuggestionRequest,
        catalog: &[Service],
    ) -> Result<Suggestion, SuggestError> {
        let body = MessagesRequest {
            model: &self.inner.model,
            max_tokens: MAX_TOKENS,
            system: SYSTEM_PROMPT,
            messages: vec![MessageParam {
                role: "user",
                content: build_prompt(request, catalog),
            }],
        };

        let response = self
            .inner
            .client
            .post(ANTHROPIC_API_URL)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SuggestError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| SuggestError::Parse(e.to_string()))?;
        let text = parsed
            .content
            .first()
            .map(|block| block.text.as_str())
            .unwrap_or_default();

        parse_suggestion(text)
    }
}

fn build_prompt(request: &SuggestionRequest, catalog: &[Service]) -> String {
    use std::fmt::Write;

    let mut prompt = String::from("Catalog:\n");
    for service in catalog {
        let _ = writeln!(prompt, "- {} (${})", service.name, service.price);
    }

    let _ = write!(
        prompt,
        "\nCar: {} {} {}",
        request.car_details.year, request.car_details.make, request.car_details.model
    );
    let _ = write!(prompt, "\nCondition: {}", request.car_details.condition);
    if let Some(notes) = &request.car_condition_notes {
        let _ = write!(prompt, "\nCondition notes: {notes}");
    }
    if let Some(prefs) = &request.customer_preferences {
        let _ = write!(prompt, "\nCustomer preferences: {prefs}");
    }

    prompt
}

/// Parse the model's reply, tolerating a fenced code block around the JSON.
fn parse_suggestion(text: &str) -> Result<Suggestion, SuggestError> {
    let trimmed = text.trim();
    let json = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map_or(trimmed, str::trim);

    serde_json::from_str(json).map_err(|e| SuggestError::Parse(e.to_string()))
}
