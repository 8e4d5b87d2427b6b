//! The backing document store.
//!
//! Each collection is schemaless and read/written whole: the application
//! mirrors every collection fully in memory and writes the complete
//! collection back after each mutation, the same contract the original
//! deployment had against its document database. Writes are atomic per
//! collection; there are no cross-collection transactions.
//!
//! Two backends exist: [`JsonFileStore`] (one JSON file per collection under
//! a data directory) for deployments, and [`MemoryStore`] for tests.

pub mod json_file;
pub mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Collection names used by the application.
pub mod collections {
    pub const SERVICES: &str = "services";
    pub const WASH_RECORDS: &str = "wash_records";
    pub const BILLING_REQUESTS: &str = "billing_requests";
    pub const NOTIFICATIONS: &str = "notifications";
}

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying filesystem error.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be serialized or deserialized.
    #[error("data corruption: {0}")]
    DataCorruption(#[from] serde_json::Error),

    /// The store refused the write (used by the test backend to exercise
    /// the write-failure policy).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A backing document store.
#[derive(Debug)]
pub enum DocumentStore {
    JsonFile(JsonFileStore),
    Memory(MemoryStore),
}

impl DocumentStore {
    /// Open a file-backed store rooted at `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn json_file(data_dir: impl Into<std::path::PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::JsonFile(JsonFileStore::open(data_dir)?))
    }

    /// Create an empty in-memory store.
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Read every document in a collection. Missing collections are empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on I/O failure or undecodable data.
    pub async fn read_all<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        match self {
            Self::JsonFile(store) => store.read_all(collection).await,
            Self::Memory(store) => store.read_all(collection).await,
        }
    }

    /// Replace a collection's contents atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write does not complete; the previous
    /// contents remain in place.
    pub async fn replace_all<T: Serialize>(
        &self,
        collection: &str,
        docs: &[T],
    ) -> Result<(), StoreError> {
        match self {
            Self::JsonFile(store) => store.replace_all(collection, docs).await,
            Self::Memory(store) => store.replace_all(collection, docs).await,
        }
    }
}
