//! Validation modules

pub mod identifier;

pub use identifier::{validate_identifier, MAX_IDENTIFIER_LENGTH};
