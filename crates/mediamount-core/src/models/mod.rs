//! Data models for the storage adapter
//!
//! Sources describe what is being stored, upload models describe the exchange
//! with the media API, and record models describe the row or document that
//! receives the resulting reference.

mod record;
mod source;
mod transformation;
mod upload;

// Re-export all models for convenient imports
pub use record::*;
pub use source::*;
pub use transformation::*;
pub use upload::*;
