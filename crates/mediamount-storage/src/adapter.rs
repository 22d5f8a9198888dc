//! Storage adapter delegating file storage to the media API.
//!
//! One `store` call performs at most one upload, then writes the reference,
//! the page count and the metadata onto the owning record, in that order.
//! Any failure stops the remaining writes.

use async_trait::async_trait;
use mediamount_core::constants::DEFAULT_PAGE_COUNT;
use mediamount_core::models::{
    EagerTransformation, FieldValue, OwningRecord, UploadPayload, UploadRequest, UploadResult,
    UploadSource,
};
use mediamount_core::{MountError, MountResult, RemoteUploader, UploaderConfig};
use mediamount_db::{RecordBackend, RecordTarget};
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::keys::reference_for;
use crate::traits::Storage;

/// Stores attachments on the media API and records the result on the owner.
pub struct StorageAdapter {
    config: UploaderConfig,
    uploader: Arc<dyn RemoteUploader>,
    /// `None` when the record declares a backend without an implementation.
    backend: Option<RecordBackend>,
    last_result: Mutex<Option<UploadResult>>,
}

impl StorageAdapter {
    pub fn new(
        config: UploaderConfig,
        uploader: Arc<dyn RemoteUploader>,
        backend: Option<RecordBackend>,
    ) -> Self {
        Self {
            config,
            uploader,
            backend,
            last_result: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    /// Response of the last successful upload, if any.
    pub fn last_result(&self) -> Option<UploadResult> {
        self.last_result
            .lock()
            .ok()
            .and_then(|result| result.clone())
    }

    /// Store `source` for `record`.
    #[tracing::instrument(skip(self, source, record), fields(source = source.kind(), record_id = %record.id))]
    pub async fn store(
        &self,
        source: &mut UploadSource,
        record: &mut OwningRecord,
    ) -> MountResult<()> {
        if !self.config.processing_enabled {
            tracing::debug!("Processing disabled, skipping store");
            return Ok(());
        }

        if !self.config.primary {
            if self.config.version_names.len() > 1 {
                return Err(MountError::configuration("nested versions are not allowed."));
            }
            // Versions are derived by the media API, nothing is stored for them here.
            tracing::debug!(versions = ?self.config.version_names, "Not the primary version, skipping store");
            return Ok(());
        }

        let payload = match source {
            UploadSource::PreloadedRemoteVersion { version } => {
                let version = version.clone();
                return self.persist_reference(&version, record).await;
            }
            UploadSource::RemoteFileAlreadyStored => {
                tracing::debug!("File already stored remotely, nothing to upload");
                return Ok(());
            }
            UploadSource::RemoteFileReference(uri) => UploadPayload::Uri(uri.clone()),
            UploadSource::LocalFile(file) => {
                let filename = file.filename();
                let data = file.read_content().await?;
                UploadPayload::File { filename, data }
            }
        };

        let request = self.build_request()?;
        let result = self.uploader.upload(payload, &request).await?;

        if let Some(ref error) = result.error {
            tracing::warn!(message = %error.message, http_code = error.http_code, "Upload failed");
            return Err(MountError::upload(error.message.clone(), error.http_code));
        }

        // Kept even when a write below fails; it identifies the remote asset.
        if let Ok(mut last) = self.last_result.lock() {
            *last = Some(result.clone());
        }

        if let Some(ref version) = result.version {
            self.persist_reference(version, record).await?;
        }
        self.persist_page_count(result.pages.unwrap_or(DEFAULT_PAGE_COUNT), record)
            .await?;
        self.persist_metadata(&result.metadata, record).await?;

        Ok(())
    }

    /// Build the upload parameters from the uploader configuration.
    ///
    /// Fails when a version declares tags; only the primary upload is tagged.
    pub fn build_request(&self) -> MountResult<UploadRequest> {
        if let Some(version) = self.config.versions.iter().find(|v| v.tags.is_some()) {
            return Err(MountError::configuration(format!(
                "version '{}' declares tags; tags are only supported on the main uploader",
                version.name
            )));
        }

        let eager: Vec<EagerTransformation> = self
            .config
            .eager_versions()
            .map(|version| EagerTransformation {
                transformation: version.transformation.clone(),
                format: version.format.clone(),
            })
            .collect();

        Ok(UploadRequest {
            transformation: self.config.transformation.clone(),
            format: self.config.format.clone(),
            public_id: self.config.public_id.clone(),
            tags: self.config.tags.clone(),
            eager: (!eager.is_empty()).then_some(eager),
            storage_type: self.config.storage_type,
            resource_type: self.config.resource_type.unwrap_or_default(),
            return_error: true,
        })
    }

    fn target(&self, record: &OwningRecord) -> RecordTarget {
        RecordTarget::for_record(&self.config.record, &record.id)
    }

    /// Write `v{version}/{filename}` into the serialization column.
    pub async fn persist_reference(
        &self,
        version: &str,
        record: &mut OwningRecord,
    ) -> MountResult<()> {
        let backend = self.backend.as_ref().ok_or_else(|| {
            MountError::configuration(format!(
                "Only relational and document records are supported at the moment (record backend: '{}')",
                self.config.record.backend
            ))
        })?;

        let column = &self.config.record.serialization_column;
        let value = FieldValue::Text(reference_for(version, &self.config.identifier));

        backend
            .update_field(&self.target(record), column, &value)
            .await?;
        record.write_attribute(column, &value);

        tracing::info!(column = %column, reference = %value, backend = %backend.kind(), "Stored reference persisted");
        Ok(())
    }

    /// Write the page count when the record declares a page-count field.
    pub async fn persist_page_count(&self, pages: i64, record: &mut OwningRecord) -> MountResult<()> {
        let Some(ref field) = self.config.record.page_count_field else {
            return Ok(());
        };
        let Some(backend) = self.relational_backend() else {
            return Ok(());
        };

        let value = FieldValue::Integer(pages);
        backend
            .update_field(&self.target(record), field, &value)
            .await?;
        record.write_attribute(field, &value);

        tracing::debug!(field = %field, pages, "Page count persisted");
        Ok(())
    }

    /// Write the upload metadata as JSON text into `{column}_metadata`.
    pub async fn persist_metadata(
        &self,
        metadata: &Value,
        record: &mut OwningRecord,
    ) -> MountResult<()> {
        if !self.config.record.has_metadata_field {
            return Ok(());
        }
        let Some(backend) = self.relational_backend() else {
            return Ok(());
        };

        let column = self.config.record.metadata_column();
        let value = FieldValue::Text(serde_json::to_string(metadata)?);
        backend
            .update_field(&self.target(record), &column, &value)
            .await?;
        record.write_attribute(&column, &value);

        tracing::debug!(column = %column, "Upload metadata persisted");
        Ok(())
    }

    fn relational_backend(&self) -> Option<&RecordBackend> {
        self.backend
            .as_ref()
            .filter(|backend| backend.supports_auxiliary_fields())
    }
}

#[async_trait]
impl Storage for StorageAdapter {
    async fn store(
        &self,
        source: &mut UploadSource,
        record: &mut OwningRecord,
    ) -> MountResult<()> {
        StorageAdapter::store(self, source, record).await
    }

    fn identifier(&self) -> &str {
        &self.config.identifier
    }
}
