//! HTTP middleware and extractors.

pub mod auth;

pub use auth::{RequireAuth, bearer_token};
