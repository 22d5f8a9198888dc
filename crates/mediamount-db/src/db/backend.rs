//! Field-update capability shared by the persistence backends.

use async_trait::async_trait;
use mediamount_core::models::{FieldValue, RecordId};
use mediamount_core::validation::validate_identifier;
use mediamount_core::{BackendKind, MountResult, RecordConfig};
use sqlx::PgPool;
use std::sync::Arc;

use super::document::DocumentRecordRepository;
use super::relational::RelationalRecordRepository;

/// Identity of the record being updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordTarget {
    /// Table or collection name
    pub table: String,
    /// Column holding the record identity
    pub key_column: String,
    pub id: RecordId,
}

impl RecordTarget {
    pub fn new(table: impl Into<String>, key_column: impl Into<String>, id: RecordId) -> Self {
        Self {
            table: table.into(),
            key_column: key_column.into(),
            id,
        }
    }

    pub fn for_record(config: &RecordConfig, id: &RecordId) -> Self {
        Self::new(config.table.clone(), config.primary_key.clone(), id.clone())
    }
}

/// Update one field on one record by identity.
#[async_trait]
pub trait FieldWriter: Send + Sync {
    /// Write `value` into `field` of the record identified by `target`.
    ///
    /// Returns the number of records updated.
    async fn update_field(
        &self,
        target: &RecordTarget,
        field: &str,
        value: &FieldValue,
    ) -> MountResult<u64>;
}

/// Persistence backend of the owning record, resolved once from configuration.
#[derive(Clone)]
pub enum RecordBackend {
    Relational(Arc<dyn FieldWriter>),
    Document(Arc<dyn FieldWriter>),
}

impl RecordBackend {
    pub fn kind(&self) -> BackendKind {
        match self {
            RecordBackend::Relational(_) => BackendKind::Relational,
            RecordBackend::Document(_) => BackendKind::Document,
        }
    }

    /// Page count and metadata are only written to relational records.
    pub fn supports_auxiliary_fields(&self) -> bool {
        matches!(self, RecordBackend::Relational(_))
    }

    pub async fn update_field(
        &self,
        target: &RecordTarget,
        field: &str,
        value: &FieldValue,
    ) -> MountResult<u64> {
        let writer = match self {
            RecordBackend::Relational(writer) | RecordBackend::Document(writer) => writer,
        };
        writer.update_field(target, field, value).await
    }
}

impl std::fmt::Debug for RecordBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("RecordBackend").field(&self.kind()).finish()
    }
}

/// Build the Postgres backend declared by the record configuration.
///
/// Returns `Ok(None)` for backend kinds without an implementation; persisting a
/// reference through such a record is a configuration error reported by the adapter.
pub fn resolve_backend(config: &RecordConfig, pool: PgPool) -> MountResult<Option<RecordBackend>> {
    config.validate()?;

    let backend = match config.backend {
        BackendKind::Relational => Some(RecordBackend::Relational(Arc::new(
            RelationalRecordRepository::new(pool),
        ))),
        BackendKind::Document => Some(RecordBackend::Document(Arc::new(
            DocumentRecordRepository::new(pool, config.document_column()),
        ))),
        BackendKind::Unsupported(ref name) => {
            tracing::warn!(backend = %name, table = %config.table, "Unsupported record backend");
            None
        }
    };

    Ok(backend)
}

/// Validate and double-quote a table, column or key name.
pub fn quote_identifier(name: &str) -> MountResult<String> {
    validate_identifier(name)?;
    Ok(format!("\"{}\"", name))
}
