use crate::{GoogleDriveStorage, ServiceAccountTokenSource, Storage, StorageError, StorageResult};
use reqwest::redirect::Policy;
use std::sync::Arc;
use std::time::Duration;
use tgdrive_core::constants::DRIVE_SCOPE;
use tgdrive_core::Config;

const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Create the storage backend described by the configuration.
///
/// Only a connect timeout is set: a chunk upload may legitimately take long
/// on slow links and there is no overall transfer deadline.
pub fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    // Drive answers incomplete chunks with 308 and no Location; never follow it.
    let http_client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .redirect(Policy::none())
        .build()
        .map_err(|e| StorageError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

    let token_source = ServiceAccountTokenSource::new(
        config.service_account().clone(),
        DRIVE_SCOPE,
        http_client.clone(),
    )?;

    tracing::info!(
        client_email = %config.service_account().client_email,
        folder_id = config.drive_folder_id().unwrap_or("root"),
        "Google Drive storage configured"
    );

    Ok(Arc::new(GoogleDriveStorage::new(
        http_client,
        config.drive_api_url(),
        Arc::new(token_source),
    )))
}
