//! Core types for Washlytics.
//!
//! This module provides the entity shapes stored in the document collections
//! plus type-safe wrappers for common domain concepts.

pub mod billing;
pub mod email;
pub mod id;
pub mod notification;
pub mod role;
pub mod service;
pub mod user;
pub mod wash;

pub use billing::{BillingChangeRequest, RequestStatus};
pub use email::{Email, EmailError};
pub use id::*;
pub use notification::Notification;
pub use role::Role;
pub use service::{Service, ServiceCategory};
pub use user::User;
pub use wash::{CarDetails, WashRecord};
