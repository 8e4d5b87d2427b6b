//! Seed a data directory with the default service catalog.

use tracing::info;

use washlytics_core::Service;
use washlytics_core::catalog::default_catalog;
use washlytics_server::store::{DocumentStore, collections};

/// Write the default catalog into `data_dir`.
///
/// Refuses to overwrite a non-empty catalog unless `force` is set. The
/// other collections are left alone; the server treats missing files as
/// empty collections.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the existing
/// catalog cannot be read, or the write fails.
pub async fn run(data_dir: &str, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = DocumentStore::json_file(data_dir)?;

    let existing: Vec<Service> = store.read_all(collections::SERVICES).await?;
    if !existing.is_empty() && !force {
        return Err(format!(
            "{data_dir} already has {} services; pass --force to overwrite",
            existing.len()
        )
        .into());
    }

    let catalog = default_catalog();
    store.replace_all(collections::SERVICES, &catalog).await?;

    info!(
        data_dir,
        services = catalog.len(),
        "service catalog seeded"
    );
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_writes_default_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();

        run(path, false).await.unwrap();

        let store = DocumentStore::json_file(path).unwrap();
        let services: Vec<Service> = store.read_all(collections::SERVICES).await.unwrap();
        assert_eq!(services.len(), default_catalog().len());
    }

    #[tokio::test]
    async fn test_seed_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();

        run(path, false).await.unwrap();
        assert!(run(path, false).await.is_err());
        run(path, true).await.unwrap();
    }
}
