//! Mediamount Core Library
//!
//! This crate provides the configuration, error types, domain models and
//! validation shared by the mediamount crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod remote;
pub mod validation;

// Re-export commonly used types
pub use config::{AuthScheme, BackendKind, MountConfig, RecordConfig, UploaderConfig, VersionConfig};
pub use error::{ErrorMetadata, LogLevel, MountError, MountResult};
pub use remote::RemoteUploader;
