//! Error types for TarSum.

use tarsum_core::{CoreError, Version};
use thiserror::Error;

/// Errors that can occur while computing or interpreting TarSums.
#[derive(Debug, Error)]
pub enum TarSumError {
    /// Version lookup error.
    #[error("version error: {0}")]
    Core(#[from] CoreError),

    /// I/O error from an archive or a hash writer.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Checksum string is not `{label}+{hash-id}:{digest}`.
    #[error("malformed checksum: {0:?}")]
    MalformedChecksum(String),

    /// Checksum was produced under a different version.
    #[error("checksum version mismatch: expected {expected}, got {found}")]
    VersionMismatch { expected: Version, found: Version },
}

/// Result type for TarSum operations.
pub type Result<T> = std::result::Result<T, TarSumError>;
