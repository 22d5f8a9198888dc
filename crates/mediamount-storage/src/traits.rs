//! Storage abstraction trait
//!
//! This module defines the trait the attachment layer calls to store a file.

use async_trait::async_trait;
use mediamount_core::models::{OwningRecord, UploadSource};
use mediamount_core::MountResult;

/// Storage abstraction trait
///
/// Implementations take the file attached to `record` and make it durable,
/// writing whatever reference they produce back onto the record.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `source` for `record`.
    ///
    /// The source is borrowed mutably so open streams can be rewound and read
    /// while staying owned by the caller.
    async fn store(&self, source: &mut UploadSource, record: &mut OwningRecord)
        -> MountResult<()>;

    /// Identifier of the stored file (its last segment appears in references)
    fn identifier(&self) -> &str;
}
