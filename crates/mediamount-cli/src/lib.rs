//! Helpers shared by the `mediamount` binary.

use anyhow::Context;
use mediamount_core::models::UploadSource;
use mediamount_core::{ErrorMetadata, LogLevel, MountError, UploaderConfig};
use std::path::{Path, PathBuf};

/// Initialize tracing for CLI binaries.
///
/// `RUST_LOG` overrides the default `mediamount=info` filter.
pub fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mediamount=info,info"));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Read and validate an uploader configuration file (JSON).
pub fn load_uploader_config(path: &Path) -> anyhow::Result<UploaderConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read uploader config: {}", path.display()))?;
    UploaderConfig::from_json(&json)
        .with_context(|| format!("Invalid uploader config: {}", path.display()))
}

/// Where the file to store comes from, as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceArg {
    File(PathBuf),
    Url(String),
    Preloaded(String),
    AlreadyStored,
}

impl SourceArg {
    /// Pick the single source given among the mutually exclusive flags.
    pub fn from_flags(
        file: Option<PathBuf>,
        url: Option<String>,
        preloaded_version: Option<String>,
        already_stored: bool,
    ) -> anyhow::Result<Self> {
        let mut sources = Vec::new();
        if let Some(path) = file {
            sources.push(SourceArg::File(path));
        }
        if let Some(url) = url {
            sources.push(SourceArg::Url(url));
        }
        if let Some(version) = preloaded_version {
            sources.push(SourceArg::Preloaded(version));
        }
        if already_stored {
            sources.push(SourceArg::AlreadyStored);
        }

        match sources.len() {
            1 => Ok(sources.remove(0)),
            0 => Err(anyhow::anyhow!(
                "One of --file, --url, --preloaded-version or --already-stored is required"
            )),
            _ => Err(anyhow::anyhow!(
                "Only one of --file, --url, --preloaded-version or --already-stored may be given"
            )),
        }
    }

    pub fn into_source(self) -> UploadSource {
        match self {
            SourceArg::File(path) => UploadSource::local_path(path),
            SourceArg::Url(url) => UploadSource::remote(url),
            SourceArg::Preloaded(version) => UploadSource::preloaded(version),
            SourceArg::AlreadyStored => UploadSource::RemoteFileAlreadyStored,
        }
    }
}

/// Log a store failure at the level its kind calls for.
pub fn report_error(err: &MountError) {
    let code = err.error_code();
    let action = err.suggested_action().unwrap_or("");
    match err.log_level() {
        LogLevel::Warn => tracing::warn!(error = %err, code, action, "Store failed"),
        LogLevel::Error => tracing::error!(error = %err, code, action, "Store failed"),
    }
}

/// Process exit code for a store failure.
pub fn exit_code(err: &MountError) -> u8 {
    match err {
        MountError::Configuration(_) => 78,
        MountError::Upload { .. } => 65,
        _ if err.is_recoverable() => 75,
        _ => 1,
    }
}

/// Report a failed run and pick its exit code.
///
/// Store failures keep their own code; anything else (bad flags, unreadable
/// config) exits with 1.
pub fn failure_exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<MountError>() {
        Some(mount_err) => {
            report_error(mount_err);
            exit_code(mount_err)
        }
        None => {
            tracing::error!(error = %format!("{:#}", err), "Command failed");
            1
        }
    }
}
