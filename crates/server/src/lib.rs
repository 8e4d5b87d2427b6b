//! Washlytics Server - JSON API for the car-wash management application.
//!
//! # Architecture
//!
//! - Axum routers serving a JSON API consumed by the staff and owner clients
//! - A full in-memory mirror of every collection ([`cache::CollectionCache`]),
//!   backed by a file-per-collection document store ([`store`])
//! - Bearer-token sessions against a mocked credential directory ([`auth`])
//! - Role gates on every billing and catalog mutation
//! - An Anthropic-backed service suggestion client ([`suggest`])
//!
//! The binary in `main.rs` wires these together; everything is exported here
//! so the integration-tests crate can drive the same code paths directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod ids;
pub mod middleware;
pub mod notify;
pub mod routes;
pub mod state;
pub mod store;
pub mod suggest;
