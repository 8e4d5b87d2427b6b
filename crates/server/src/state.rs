//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::AuthService;
use crate::cache::CollectionCache;
use crate::config::ServerConfig;
use crate::suggest::SuggestClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// collection cache, authentication sessions, and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    cache: CollectionCache,
    auth: AuthService,
    suggest: Option<SuggestClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The suggestion client exists only when an API key is configured;
    /// the suggestion route reports itself unavailable otherwise.
    #[must_use]
    pub fn new(config: ServerConfig, cache: CollectionCache) -> Self {
        let suggest = config.suggest.as_ref().map(SuggestClient::new);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                cache,
                auth: AuthService::new(),
                suggest,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the collection cache.
    #[must_use]
    pub fn cache(&self) -> &CollectionCache {
        &self.inner.cache
    }

    /// Get a reference to the authentication service.
    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    /// Get the suggestion client, if configured.
    #[must_use]
    pub fn suggest(&self) -> Option<&SuggestClient> {
        self.inner.suggest.as_ref()
    }
}
