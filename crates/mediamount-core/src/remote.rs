//! Capability of the remote media API used by the storage adapter.
//!
//! The adapter only needs one operation from the API; keeping it behind a
//! trait lets the HTTP client live in its own crate and lets tests substitute
//! an in-memory uploader.

use async_trait::async_trait;

use crate::error::MountResult;
use crate::models::{UploadPayload, UploadRequest, UploadResult};

/// Uploads a payload to the media API.
#[async_trait]
pub trait RemoteUploader: Send + Sync {
    /// Upload `payload` with the given parameters.
    ///
    /// When `request.return_error` is set, API-side failures are reported in
    /// `UploadResult::error` rather than as `Err`; transport failures are
    /// always `Err`.
    async fn upload(
        &self,
        payload: UploadPayload,
        request: &UploadRequest,
    ) -> MountResult<UploadResult>;
}
