//! Washlytics Core - Shared domain library.
//!
//! This crate provides the domain model used across all Washlytics components:
//! - `server` - JSON API serving staff and owner clients
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains types and pure domain logic - no I/O, no HTTP,
//! no storage access. Everything here operates on in-memory values, which
//! keeps it lightweight and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Entities (users, wash records, services, billing requests,
//!   notifications) and type-safe ID wrappers
//! - [`validate`] - Per-form field validation applied before any mutation
//! - [`money`] - Decimal subtotal and discount arithmetic
//! - [`catalog`] - The default service catalog used for seeding
//! - [`analytics`] - Day-bucketed aggregation over wash records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod catalog;
pub mod money;
pub mod types;
pub mod validate;

pub use types::*;
