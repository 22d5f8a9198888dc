//! Reference strings persisted on the owning record.
//!
//! Reference format: `v{version}/{filename}`, where `filename` is the last path
//! segment of the uploader identifier.

use mediamount_core::constants::REFERENCE_VERSION_PREFIX;

/// Text after the final `/`, or the whole identifier when it has none.
pub fn last_path_segment(identifier: &str) -> &str {
    identifier.rsplit('/').next().unwrap_or(identifier)
}

/// Build the reference for a stored version of `identifier`.
pub fn reference_for(version: &str, identifier: &str) -> String {
    format!(
        "{}{}/{}",
        REFERENCE_VERSION_PREFIX,
        version,
        last_path_segment(identifier)
    )
}

/// Split a stored reference back into `(version, filename)`.
///
/// Returns `None` when the text does not follow the reference format.
pub fn parse_reference(reference: &str) -> Option<(&str, &str)> {
    let (version, filename) = reference.split_once('/')?;
    let version = version.strip_prefix(REFERENCE_VERSION_PREFIX)?;
    if version.is_empty() || filename.is_empty() || filename.contains('/') {
        return None;
    }
    Some((version, filename))
}
