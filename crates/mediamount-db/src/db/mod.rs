//! Record persistence backends
//!
//! Records are updated one field at a time through the `FieldWriter`
//! capability. Two backends implement it over Postgres: relational rows
//! updated by primary key, and JSONB documents updated in place. The
//! in-memory writer records writes without a database.
//
// Field-update capability and the closed backend variant
pub mod backend;
//
// Postgres implementations
pub mod document;
pub mod relational;
//
// In-memory implementation
pub mod memory;
//
// Connection pool setup
pub mod pool;

pub use backend::{quote_identifier, resolve_backend, FieldWriter, RecordBackend, RecordTarget};
pub use document::DocumentRecordRepository;
pub use memory::{MemoryFieldWriter, WrittenField};
pub use pool::create_pool;
pub use relational::RelationalRecordRepository;
