//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `WASHLYTICS_HOST` - Bind address (default: 127.0.0.1)
//! - `WASHLYTICS_PORT` - Listen port (default: 8080)
//! - `WASHLYTICS_DATA_DIR` - Document store directory (default: ./data)
//! - `ANTHROPIC_API_KEY` - Key for the service suggestion endpoint; when
//!   absent the suggestion route answers 503
//! - `SUGGEST_MODEL` - Model used for suggestions (default: claude-sonnet-4-5)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_SUGGEST_MODEL: &str = "claude-sonnet-4-5";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Washlytics server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the per-collection JSON documents
    pub data_dir: PathBuf,
    /// Suggestion endpoint configuration; `None` disables the route
    pub suggest: Option<SuggestConfig>,
}

/// Service suggestion API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct SuggestConfig {
    /// Anthropic API key
    pub api_key: SecretString,
    /// Model identifier used for suggestion calls
    pub model: String,
}

impl std::fmt::Debug for SuggestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("WASHLYTICS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("WASHLYTICS_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("WASHLYTICS_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("WASHLYTICS_PORT".to_string(), e.to_string())
            })?;
        let data_dir = PathBuf::from(get_env_or_default("WASHLYTICS_DATA_DIR", "data"));
        let suggest = SuggestConfig::from_env();

        Ok(Self {
            host,
            port,
            data_dir,
            suggest,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SuggestConfig {
    fn from_env() -> Option<Self> {
        let api_key = get_optional_env("ANTHROPIC_API_KEY").map(SecretString::from)?;
        Some(Self {
            api_key,
            model: get_env_or_default("SUGGEST_MODEL", DEFAULT_SUGGEST_MODEL),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 8080,
            data_dir: PathBuf::from("data"),
            suggest: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_suggest_config_debug_redacts_key() {
        let config = SuggestConfig {
            api_key: SecretString::from("super_secret_api_key"),
            model: DEFAULT_SUGGEST_MODEL.to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_key"));
    }
}
