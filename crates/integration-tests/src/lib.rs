//! Integration tests for Washlytics.
//!
//! Tests drive the real router in-process against an in-memory store, so
//! the whole stack runs without a network listener or a data directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p washlytics-integration-tests
//! ```

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use washlytics_core::catalog::default_catalog;
use washlytics_server::cache::CollectionCache;
use washlytics_server::config::ServerConfig;
use washlytics_server::routes;
use washlytics_server::state::AppState;
use washlytics_server::store::{DocumentStore, collections};

/// A router wired to fresh state with the default catalog seeded.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    /// Build an app backed by an in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if seeding or loading the store fails.
    pub async fn new() -> Self {
        let store = DocumentStore::memory();
        store
            .replace_all(collections::SERVICES, &default_catalog())
            .await
            .expect("Failed to seed catalog");
        let cache = CollectionCache::load(store)
            .await
            .expect("Failed to load collections");

        let config = ServerConfig {
            host: "127.0.0.1".parse().expect("bad host"),
            port: 0,
            data_dir: "unused".into(),
            suggest: None,
        };
        let state = AppState::new(config, cache);

        Self {
            router: routes::routes().with_state(state),
        }
    }

    /// Log in and return the bearer token.
    ///
    /// # Panics
    ///
    /// Panics if login does not succeed.
    pub async fn login(&self, email: &str, role: &str) -> String {
        let (status, body) = self
            .post(
                "/auth/login",
                None,
                &json!({ "email": email, "password": "pw", "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"]
            .as_str()
            .expect("login response missing token")
            .to_owned()
    }

    /// Log in as the owner account.
    pub async fn login_owner(&self) -> String {
        self.login("owner@washlytics.com", "owner").await
    }

    /// Log in as the staff account.
    pub async fn login_staff(&self) -> String {
        self.login("staff@washlytics.com", "staff").await
    }

    /// Send a GET request.
    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Request::get(path), token, None).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: &Value,
    ) -> (StatusCode, Value) {
        self.send(Request::post(path), token, Some(body)).await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put(&self, path: &str, token: Option<&str>, body: &Value) -> (StatusCode, Value) {
        self.send(Request::put(path), token, Some(body)).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Request::delete(path), token, None).await
    }

    async fn send(
        &self,
        builder: axum::http::request::Builder,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let mut builder = builder.header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router error");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }
}
