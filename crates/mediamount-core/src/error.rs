//! Error types module
//!
//! All failures raised while storing an attachment are unified under the
//! `MountError` enum. Configuration problems and remote upload failures are the
//! two domain errors; the remaining variants wrap failures of the collaborators
//! (database, HTTP transport, local IO, JSON).
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx` feature.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Warning level - for failures reported by the remote API
    Warn,
    /// Error level - for misconfiguration and unexpected failures
    Error,
}

/// Metadata describing how an error should be reported by callers
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "CONFIGURATION_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether the failed operation can be retried as-is
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the operator
    fn suggested_action(&self) -> Option<&'static str>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    /// The uploader or record configuration cannot be honored.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The remote API answered with an error payload.
    #[error("Upload error ({http_code}): {message}")]
    Upload { message: String, http_code: u16 },

    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl MountError {
    pub fn configuration(message: impl Into<String>) -> Self {
        MountError::Configuration(message.into())
    }

    pub fn upload(message: impl Into<String>, http_code: u16) -> Self {
        MountError::Upload {
            message: message.into(),
            http_code,
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for MountError {
    fn from(err: SqlxError) -> Self {
        MountError::Database(err)
    }
}

/// Result type for mount operations
pub type MountResult<T> = Result<T, MountError>;

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn mount_error_static_metadata(
    err: &MountError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        MountError::Configuration(_) => (
            "CONFIGURATION_ERROR",
            false,
            Some("Fix the uploader or record configuration"),
            LogLevel::Error,
        ),
        MountError::Upload { http_code, .. } if *http_code >= 500 => (
            "UPLOAD_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Warn,
        ),
        MountError::Upload { .. } => (
            "UPLOAD_ERROR",
            false,
            Some("Check the file and upload parameters"),
            LogLevel::Warn,
        ),
        MountError::Database(_) => (
            "DATABASE_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
        MountError::Http(_) => (
            "HTTP_ERROR",
            true,
            Some("Check connectivity to the media API"),
            LogLevel::Error,
        ),
        MountError::Io(_) => (
            "IO_ERROR",
            false,
            Some("Check that the source file is readable"),
            LogLevel::Error,
        ),
        MountError::Serialization(_) => ("SERIALIZATION_ERROR", false, None, LogLevel::Error),
    }
}

impl ErrorMetadata for MountError {
    fn error_code(&self) -> &'static str {
        mount_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        mount_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        mount_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        mount_error_static_metadata(self).3
    }
}
