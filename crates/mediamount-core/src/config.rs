//! Configuration module
//!
//! Two layers of configuration exist:
//! - `MountConfig` is process-wide and read from the environment (media API
//!   endpoint and credentials, database connection settings).
//! - `UploaderConfig` describes one mounted attachment: how uploads are built
//!   and which record field receives the resulting reference. It is plain data
//!   deserialized from JSON (or built in code).

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::constants::{
    DEFAULT_API_TIMEOUT_SECS, DEFAULT_API_VERSION, DEFAULT_DOCUMENT_COLUMN, DEFAULT_DOCUMENT_KEY,
    DEFAULT_PRIMARY_KEY, METADATA_COLUMN_SUFFIX,
};
use crate::error::{MountError, MountResult};
use crate::models::{ResourceType, StorageType, Transformation};
use crate::validation::validate_identifier;

// Common constants
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_API_URL: &str = "http://localhost:3000";

/// How the media API client authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `X-API-Key: {key}`
    #[default]
    ApiKey,
    /// `Authorization: Bearer {token}`
    Bearer,
}

/// Process configuration read from the environment.
#[derive(Clone, Debug)]
pub struct MountConfig {
    pub api_url: String,
    pub api_key: String,
    pub auth_scheme: AuthScheme,
    pub api_version: String,
    pub api_timeout_seconds: u64,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl MountConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let api_url = env::var("MEDIAMOUNT_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let api_key = env::var("MEDIAMOUNT_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .map_err(|_| anyhow::anyhow!("Missing API key. Set MEDIAMOUNT_API_KEY or API_KEY"))?;

        let auth_scheme = match env::var("MEDIAMOUNT_AUTH_SCHEME")
            .unwrap_or_else(|_| "api-key".to_string())
            .to_lowercase()
            .as_str()
        {
            "api-key" | "x-api-key" => AuthScheme::ApiKey,
            "bearer" => AuthScheme::Bearer,
            other => {
                return Err(anyhow::anyhow!(
                    "Invalid MEDIAMOUNT_AUTH_SCHEME '{}'. Must be: api-key or bearer",
                    other
                ))
            }
        };

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        Ok(Self {
            api_url,
            api_key,
            auth_scheme,
            api_version: env::var("MEDIAMOUNT_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_API_VERSION.to_string()),
            api_timeout_seconds: env::var("MEDIAMOUNT_API_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_API_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_API_TIMEOUT_SECS),
            database_url: env::var("DATABASE_URL").ok(),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    /// Check if the application is running in production mode
    ///
    /// Production processes always log as JSON.
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

/// Persistence backend declared for the owning record.
///
/// Unknown names are kept so the adapter can report them when it needs to persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BackendKind {
    /// Row in a relational table, updated by primary key
    Relational,
    /// Document in a JSONB collection, updated in place
    Document,
    Unsupported(String),
}

impl From<String> for BackendKind {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "relational" | "sql" | "postgres" => BackendKind::Relational,
            "document" | "jsonb" => BackendKind::Document,
            _ => BackendKind::Unsupported(s),
        }
    }
}

impl From<BackendKind> for String {
    fn from(kind: BackendKind) -> Self {
        kind.to_string()
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BackendKind::Relational => write!(f, "relational"),
            BackendKind::Document => write!(f, "document"),
            BackendKind::Unsupported(name) => write!(f, "{}", name),
        }
    }
}

fn default_primary_key() -> String {
    DEFAULT_PRIMARY_KEY.to_string()
}

/// Where and how the owning record is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordConfig {
    /// Table (relational) or collection (document) name.
    pub table: String,
    /// Primary key column; for documents the key column of the collection.
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    /// Field holding the reference string.
    pub serialization_column: String,
    pub backend: BackendKind,
    /// JSONB column holding the document body (document backend only).
    #[serde(default)]
    pub document_column: Option<String>,
    /// Field receiving the page count, when the record declares one.
    #[serde(default)]
    pub page_count_field: Option<String>,
    /// Whether `{serialization_column}_metadata` exists on the record.
    #[serde(default)]
    pub has_metadata_field: bool,
}

impl RecordConfig {
    pub fn relational(table: impl Into<String>, serialization_column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            primary_key: default_primary_key(),
            serialization_column: serialization_column.into(),
            backend: BackendKind::Relational,
            document_column: None,
            page_count_field: None,
            has_metadata_field: false,
        }
    }

    pub fn document(collection: impl Into<String>, serialization_column: impl Into<String>) -> Self {
        Self {
            table: collection.into(),
            primary_key: DEFAULT_DOCUMENT_KEY.to_string(),
            serialization_column: serialization_column.into(),
            backend: BackendKind::Document,
            document_column: Some(DEFAULT_DOCUMENT_COLUMN.to_string()),
            page_count_field: None,
            has_metadata_field: false,
        }
    }

    pub fn with_page_count_field(mut self, field: impl Into<String>) -> Self {
        self.page_count_field = Some(field.into());
        self
    }

    pub fn with_metadata_field(mut self) -> Self {
        self.has_metadata_field = true;
        self
    }

    /// Name of the metadata field: `{serialization_column}_metadata`.
    pub fn metadata_column(&self) -> String {
        format!("{}{}", self.serialization_column, METADATA_COLUMN_SUFFIX)
    }

    pub fn document_column(&self) -> &str {
        self.document_column
            .as_deref()
            .unwrap_or(DEFAULT_DOCUMENT_COLUMN)
    }

    pub fn validate(&self) -> MountResult<()> {
        validate_identifier(&self.table)?;
        validate_identifier(&self.primary_key)?;
        validate_identifier(&self.serialization_column)?;
        validate_identifier(&self.metadata_column())?;
        if let Some(ref field) = self.page_count_field {
            validate_identifier(field)?;
        }
        if let Some(ref column) = self.document_column {
            validate_identifier(column)?;
        }
        Ok(())
    }
}

/// A derived version declared on the uploader (e.g. a thumbnail).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionConfig {
    pub name: String,
    #[serde(default)]
    pub transformation: Transformation,
    #[serde(default)]
    pub format: Option<String>,
    /// Generate this version at upload time.
    #[serde(default)]
    pub eager: bool,
    /// Versions may not carry tags; only the primary upload is tagged.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl VersionConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

fn default_true() -> bool {
    true
}

/// Configuration of one mounted attachment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploaderConfig {
    /// When false, `store` does nothing.
    #[serde(default = "default_true")]
    pub processing_enabled: bool,
    /// Whether this uploader is the top-level one rather than a derived version.
    #[serde(default = "default_true")]
    pub primary: bool,
    /// Chain of version names this uploader represents (empty for the primary).
    #[serde(default)]
    pub version_names: Vec<String>,
    /// Identifier of the stored file; its last path segment ends up in the reference.
    pub identifier: String,
    #[serde(default)]
    pub transformation: Transformation,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub public_id: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub versions: Vec<VersionConfig>,
    #[serde(default)]
    pub storage_type: StorageType,
    /// Defaults to `auto` when unset.
    #[serde(default)]
    pub resource_type: Option<ResourceType>,
    pub record: RecordConfig,
}

impl UploaderConfig {
    pub fn new(identifier: impl Into<String>, record: RecordConfig) -> Self {
        Self {
            processing_enabled: true,
            primary: true,
            version_names: Vec::new(),
            identifier: identifier.into(),
            transformation: Transformation::default(),
            format: None,
            public_id: None,
            tags: None,
            versions: Vec::new(),
            storage_type: StorageType::default(),
            resource_type: None,
            record,
        }
    }

    /// Load an uploader configuration from a JSON document.
    pub fn from_json(json: &str) -> MountResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> MountResult<()> {
        if self.identifier.trim().is_empty() {
            return Err(MountError::configuration("identifier cannot be empty"));
        }
        self.record.validate()
    }

    pub fn eager_versions(&self) -> impl Iterator<Item = &VersionConfig> {
        self.versions.iter().filter(|v| v.eager)
    }
}
