//! Mediamount Storage Library
//!
//! This crate provides the storage adapter that delegates file storage to the
//! media API and writes the resulting reference onto the owning record.
//!
//! # Reference format
//!
//! The serialization column receives `v{version}/{filename}`, where `filename`
//! is the last path segment of the uploader identifier. Reference generation
//! is centralized in the `keys` module.

pub mod adapter;
pub mod factory;
pub mod keys;
pub mod traits;

#[cfg(test)]
mod test_helpers;

// Re-export commonly used types
pub use adapter::StorageAdapter;
#[cfg(feature = "api-client")]
pub use factory::create_storage;
pub use factory::{create_dry_run_storage, create_storage_with};
pub use keys::{last_path_segment, parse_reference, reference_for};
pub use traits::Storage;
