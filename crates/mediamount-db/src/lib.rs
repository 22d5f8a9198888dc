//! Mediamount Database Layer
//!
//! This crate provides the persistence backends that write a stored file's
//! reference (and its page count and metadata) onto the owning record.
//!
// Module declarations
pub mod db;

// Re-exports: Backends and the field-update capability
pub use db::{
    create_pool, quote_identifier, resolve_backend, DocumentRecordRepository, FieldWriter,
    MemoryFieldWriter, RecordBackend, RecordTarget, RelationalRecordRepository, WrittenField,
};

// Re-exports: Pool type used by callers wiring backends
pub use sqlx::PgPool;
