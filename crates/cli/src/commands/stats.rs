//! Show document counts per collection.

use tracing::info;

use washlytics_server::store::{DocumentStore, collections};

/// Print how many documents each collection holds.
///
/// # Errors
///
/// Returns an error if the directory cannot be opened or a collection
/// cannot be read.
pub async fn run(data_dir: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = DocumentStore::json_file(data_dir)?;

    for collection in [
        collections::SERVICES,
        collections::WASH_RECORDS,
        collections::BILLING_REQUESTS,
        collections::NOTIFICATIONS,
    ] {
        let docs: Vec<serde_json::Value> = store.read_all(collection).await?;
        info!("{collection}: {}", docs.len());
    }

    Ok(())
}
