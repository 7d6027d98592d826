//! Error types for TarSum core.

use thiserror::Error;

use crate::version::Version;

/// Errors raised by version lookups.
///
/// There are no field-level errors: header values are passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The label does not name any registered version.
    #[error("string does not include a TarSum version: {0:?}")]
    UnrecognizedVersionLabel(String),

    /// A version constant has no registered header selector.
    ///
    /// This indicates drift between the `Version` constants and the registry
    /// and must be treated as a hard failure.
    #[error("TarSum version {0:?} is not yet implemented")]
    UnimplementedVersion(Version),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let e = CoreError::UnrecognizedVersionLabel("bogus".into());
        assert_eq!(e.to_string(), "string does not include a TarSum version: \"bogus\"");

        let e = CoreError::UnimplementedVersion(Version::Dev);
        assert!(e.to_string().contains("not yet implemented"));
    }
}
