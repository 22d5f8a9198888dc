#[cfg(feature = "api-client")]
use mediamount_api_client::ApiClient;
#[cfg(feature = "api-client")]
use mediamount_core::MountConfig;
use mediamount_core::{BackendKind, MountResult, RemoteUploader, UploaderConfig};
#[cfg(feature = "api-client")]
use mediamount_db::create_pool;
use mediamount_db::{resolve_backend, MemoryFieldWriter, PgPool, RecordBackend};
use std::sync::Arc;

use crate::StorageAdapter;

/// Create a storage adapter based on configuration
///
/// Connects to the media API and to the database holding the owning records.
#[cfg(feature = "api-client")]
pub async fn create_storage(
    config: &MountConfig,
    uploader_config: UploaderConfig,
) -> MountResult<StorageAdapter> {
    uploader_config.validate()?;

    let client = ApiClient::from_config(config)?;
    let database_url = config.database_url.as_deref().ok_or_else(|| {
        mediamount_core::MountError::configuration("DATABASE_URL not configured")
    })?;
    let pool = create_pool(
        database_url,
        config.db_max_connections,
        config.db_timeout_seconds,
    )
    .await?;

    create_storage_with(uploader_config, Arc::new(client), pool)
}

/// Create a storage adapter from an existing uploader and pool
pub fn create_storage_with(
    uploader_config: UploaderConfig,
    uploader: Arc<dyn RemoteUploader>,
    pool: PgPool,
) -> MountResult<StorageAdapter> {
    let backend = resolve_backend(&uploader_config.record, pool)?;
    Ok(StorageAdapter::new(uploader_config, uploader, backend))
}

/// Create a storage adapter that records writes in memory instead of the database
pub fn create_dry_run_storage(
    uploader_config: UploaderConfig,
    uploader: Arc<dyn RemoteUploader>,
    writer: MemoryFieldWriter,
) -> MountResult<StorageAdapter> {
    uploader_config.validate()?;

    let writer = Arc::new(writer);
    let backend = match uploader_config.record.backend {
        BackendKind::Relational => Some(RecordBackend::Relational(writer)),
        BackendKind::Document => Some(RecordBackend::Document(writer)),
        BackendKind::Unsupported(_) => None,
    };

    Ok(StorageAdapter::new(uploader_config, uploader, backend))
}
