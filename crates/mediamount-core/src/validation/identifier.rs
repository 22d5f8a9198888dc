//! SQL identifier validation
//!
//! Table, column and key names come from uploader configuration and end up
//! interpolated into statements, so they are restricted to plain identifiers.

use crate::error::{MountError, MountResult};
use regex::Regex;

/// Maximum identifier length accepted by Postgres (63 bytes)
pub const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Validate a table, column or key name
///
/// Rules:
/// - Must match pattern: `^[A-Za-z_][A-Za-z0-9_]*$`
/// - Maximum 63 characters
pub fn validate_identifier(name: &str) -> MountResult<()> {
    if name.is_empty() {
        return Err(MountError::configuration("Identifier cannot be empty"));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(MountError::configuration(format!(
            "Identifier '{}' exceeds maximum length of {} characters",
            name, MAX_IDENTIFIER_LENGTH
        )));
    }

    let pattern = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").map_err(|e| {
        MountError::configuration(format!(
            "Failed to compile identifier validation regex: {}",
            e
        ))
    })?;

    if !pattern.is_match(name) {
        return Err(MountError::configuration(format!(
            "Identifier '{}' contains invalid characters. Allowed: letters, digits and underscore, not starting with a digit",
            name
        )));
    }

    Ok(())
}
