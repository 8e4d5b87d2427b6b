//! Washlytics server - car wash management API.
//!
//! Serves the JSON API: auth, wash records, the service catalog, billing
//! change requests, notifications, analytics, and service suggestions.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use washlytics_server::cache::CollectionCache;
use washlytics_server::config::ServerConfig;
use washlytics_server::routes;
use washlytics_server::state::AppState;
use washlytics_server::store::DocumentStore;

#[tokio::main]
async fn main() {
    // Defaults to info level for our crate if RUST_LOG is not set.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "washlytics_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Failed to load configuration");

    let store = DocumentStore::json_file(&config.data_dir).expect("Failed to open data directory");
    let cache = CollectionCache::load(store)
        .await
        .expect("Failed to load collections");

    let addr = config.socket_addr();
    let state = AppState::new(config, cache);

    let app = routes::routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    tracing::info!("washlytics listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
