//! Fakes shared by the adapter tests.

use async_trait::async_trait;
use mediamount_core::models::{FieldValue, UploadPayload, UploadRequest, UploadResult};
use mediamount_core::{MountError, MountResult, RecordConfig, RemoteUploader, UploaderConfig};
use mediamount_db::{FieldWriter, MemoryFieldWriter, RecordBackend, RecordTarget};
use serde_json::Value;
use std::sync::{Arc, Mutex};

use crate::adapter::StorageAdapter;

/// Uploader returning a fixed result and recording every call.
#[derive(Clone)]
pub struct RecordingUploader {
    result: UploadResult,
    calls: Arc<Mutex<Vec<(UploadPayload, UploadRequest)>>>,
}

impl RecordingUploader {
    pub fn succeeding(body: Value) -> Self {
        Self {
            result: UploadResult::from_response(body),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str, http_code: u16) -> Self {
        Self {
            result: UploadResult::failed(message, http_code),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<(UploadPayload, UploadRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl RemoteUploader for RecordingUploader {
    async fn upload(
        &self,
        payload: UploadPayload,
        request: &UploadRequest,
    ) -> MountResult<UploadResult> {
        self.calls.lock().unwrap().push((payload, request.clone()));
        Ok(self.result.clone())
    }
}

/// Field writer whose every update fails, as when the database is unreachable.
pub struct FailingFieldWriter;

#[async_trait]
impl FieldWriter for FailingFieldWriter {
    async fn update_field(
        &self,
        _target: &RecordTarget,
        _field: &str,
        _value: &FieldValue,
    ) -> MountResult<u64> {
        Err(MountError::Http("db down".to_string()))
    }
}

pub fn uploader_config(record: RecordConfig) -> UploaderConfig {
    UploaderConfig::new("avatars/sample.jpg", record)
}

pub fn relational_adapter(
    config: UploaderConfig,
    uploader: &RecordingUploader,
    writer: &MemoryFieldWriter,
) -> StorageAdapter {
    StorageAdapter::new(
        config,
        Arc::new(uploader.clone()),
        Some(RecordBackend::Relational(Arc::new(writer.clone()))),
    )
}

pub fn document_adapter(
    config: UploaderConfig,
    uploader: &RecordingUploader,
    writer: &MemoryFieldWriter,
) -> StorageAdapter {
    StorageAdapter::new(
        config,
        Arc::new(uploader.clone()),
        Some(RecordBackend::Document(Arc::new(writer.clone()))),
    )
}
