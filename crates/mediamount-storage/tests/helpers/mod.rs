//! Shared setup for storage integration tests.

use mediamount_api_client::{ApiClient, Auth};
use mediamount_core::{RecordConfig, UploaderConfig, VersionConfig};
use mediamount_core::models::Transformation;
use mediamount_db::MemoryFieldWriter;
use mediamount_storage::{create_dry_run_storage, StorageAdapter};
use std::sync::Arc;

pub const API_KEY: &str = "integration-key";

/// Uploader configuration of a document attachment with one eager thumbnail.
pub fn document_uploader_config() -> UploaderConfig {
    let record = RecordConfig::relational("documents", "file")
        .with_page_count_field("page_count")
        .with_metadata_field();
    let mut config = UploaderConfig::new("contracts/2024/agreement.pdf", record);
    config.public_id = Some("contracts/agreement".to_string());
    config.tags = Some(vec!["contracts".to_string()]);

    let mut preview = VersionConfig::new("preview");
    preview.eager = true;
    preview.transformation = Transformation::new().with("page", 1).with("width", 300);
    preview.format = Some("png".to_string());
    config.versions = vec![preview];
    config
}

/// Adapter talking to a mock media API and recording writes in memory.
pub fn adapter_against(
    server: &mockito::ServerGuard,
    config: UploaderConfig,
) -> (StorageAdapter, MemoryFieldWriter) {
    let client = ApiClient::new(server.url(), Auth::XApiKey(API_KEY.to_string()))
        .expect("client builds");
    let writer = MemoryFieldWriter::new();
    let adapter = create_dry_run_storage(config, Arc::new(client), writer.clone())
        .expect("adapter builds");
    (adapter, writer)
}
