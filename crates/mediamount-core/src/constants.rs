//! Application-wide constants.

/// Media API version used in request paths (`/api/{version}/...`).
pub const DEFAULT_API_VERSION: &str = "v1";

/// Timeout applied to media API requests.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

/// Resource type sent to the media API when the uploader does not pin one.
pub const DEFAULT_RESOURCE_TYPE: &str = "auto";

/// Page count recorded when the media API does not report one.
pub const DEFAULT_PAGE_COUNT: i64 = 1;

/// Suffix appended to the serialization column to name the metadata column.
pub const METADATA_COLUMN_SUFFIX: &str = "_metadata";

/// Prefix of the version segment in stored references (`v{version}/{filename}`).
pub const REFERENCE_VERSION_PREFIX: char = 'v';

/// Default primary key column for relational records.
pub const DEFAULT_PRIMARY_KEY: &str = "id";

/// Default JSONB column holding document-backed records.
pub const DEFAULT_DOCUMENT_COLUMN: &str = "document";

/// Default key identifying documents in a document collection.
pub const DEFAULT_DOCUMENT_KEY: &str = "_id";
