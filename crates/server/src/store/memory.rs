//! In-memory store backend for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::StoreError;

/// Keeps every collection as JSON values behind a lock.
///
/// Writes can be made to fail on demand so tests can verify that the cache
/// leaves local state untouched when the store rejects a write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<serde_json::Value>>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again) with
    /// [`StoreError::Unavailable`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Read every document in a collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DataCorruption` if a document fails to decode.
    pub async fn read_all<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|doc| serde_json::from_value(doc.clone()).map_err(StoreError::from))
            .collect()
    }

    /// Replace a collection's contents.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when writes are failed on purpose,
    /// or `StoreError::DataCorruption` if a document fails to encode.
    pub async fn replace_all<T: Serialize>(
        &self,
        collection: &str,
        docs: &[T],
    ) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_owned()));
        }

        let encoded = docs
            .iter()
            .map(|doc| serde_json::to_value(doc).map_err(StoreError::from))
            .collect::<Result<Vec<_>, _>>()?;

        let mut collections = self.collections.write().await;
        collections.insert(collection.to_owned(), encoded);
        Ok(())
    }
}
