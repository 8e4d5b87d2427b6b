//! File-per-collection JSON store.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::StoreError;

/// Stores each collection as `<data_dir>/<collection>.json`.
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write never leaves a half-written collection behind.
#[derive(Debug)]
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory cannot be created.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let data_dir = data_dir.into();
        std::fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.data_dir.join(format!("{collection}.json"))
    }

    /// Read every document in a collection; a missing file is an empty
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` on I/O failure or undecodable data.
    pub async fn read_all<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        let path = self.path_for(collection);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Replace a collection's contents.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the write fails.
    pub async fn replace_all<T: Serialize>(
        &self,
        collection: &str,
        docs: &[T],
    ) -> Result<(), StoreError> {
        let path = self.path_for(collection);
        let tmp = self.data_dir.join(format!("{collection}.json.tmp"));

        let bytes = serde_json::to_vec_pretty(docs)?;
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_missing_collection_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        let docs: Vec<serde_json::Value> = store.read_all("services").await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_replace_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        let docs = vec![json!({"id": "a"}), json!({"id": "b"})];
        store.replace_all("services", &docs).await.unwrap();

        let read: Vec<serde_json::Value> = store.read_all("services").await.unwrap();
        assert_eq!(read, docs);

        // No temp file left behind.
        assert!(!dir.path().join("services.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_replace_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        store
            .replace_all("services", &[json!({"id": "a"})])
            .await
            .unwrap();
        store
            .replace_all("services", &[json!({"id": "b"})])
            .await
            .unwrap();

        let read: Vec<serde_json::Value> = store.read_all("services").await.unwrap();
        assert_eq!(read, vec![json!({"id": "b"})]);
    }
}
