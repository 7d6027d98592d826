//! Checksum tag inspection.
//!
//! Checksums look like `{label}+{hash-id}:{hex-digest}`. Only the label is
//! looked at here; the rest of the string is never validated.

use crate::error::CoreError;
use crate::registry;
use crate::version::Version;

/// Separator between the version label and the hash identifier.
pub const LABEL_SEPARATOR: char = '+';

/// Everything before the first `+`, or `""` when there is no `+`.
pub fn label_of(checksum: &str) -> &str {
    match checksum.find(LABEL_SEPARATOR) {
        Some(idx) => &checksum[..idx],
        None => "",
    }
}

/// The version named by the label of `checksum`.
///
/// Cuts at the first `+`; a string without one is looked up whole.
pub fn version_of(checksum: &str) -> Result<Version, CoreError> {
    let label = checksum
        .split_once(LABEL_SEPARATOR)
        .map_or(checksum, |(label, _)| label);
    registry::version_for(label)
}
