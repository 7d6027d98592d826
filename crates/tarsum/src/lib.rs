//! # TarSum
//!
//! Reproducible, versioned checksums of tar archive entry headers.
//!
//! ## Overview
//!
//! Two archives holding the same files can differ byte for byte: header
//! padding, PAX record order, timestamps touched by a copy. TarSum hashes a
//! canonical selection of each entry's header instead of the raw header
//! bytes, so such archives checksum identically.
//!
//! The canonical form is versioned. A checksum names its version in a label
//! prefix, `{label}+{hash-id}:{hex-digest}`:
//!
//! | Version | Label        | Header fields |
//! |---------|--------------|---------------|
//! | V0      | `tarsum`     | 12 fixed fields, mtime included |
//! | V1      | `tarsum.v1`  | 11 fixed fields, then sorted xattrs |
//! | Dev     | `tarsum.dev` | same as V1, free to change |
//!
//! This crate does not hash; feed [`TarSum::write_header`] into whatever
//! digest writer the caller uses, along with the entry content.
//!
//! ## Usage
//!
//! ```rust
//! use tarsum::{EntryHeader, TarSum, TarSumConfig, Version};
//!
//! let tarsum = TarSum::new(TarSumConfig::new(Version::V1)).unwrap();
//!
//! let header = EntryHeader::new("etc/hostname")
//!     .mode(0o644)
//!     .size(8)
//!     .typeflag(b'0')
//!     .xattr("user.origin", "build");
//!
//! let mut hasher_input = Vec::new();
//! tarsum.write_header(&header, &mut hasher_input).unwrap();
//! assert!(hasher_input.starts_with(b"nameetc/hostnamemode420"));
//!
//! let tag = tarsum.checksum_tag("sha256", &[0u8; 32]);
//! assert!(tag.to_string().starts_with("tarsum.v1+sha256:"));
//! ```
//!
//! ## Re-exports
//!
//! - `tarsum::core` - Versions, registry, selectors ([`tarsum_core`])

pub mod archive;
pub mod driver;
pub mod error;
pub mod tag;

pub use tarsum_core as core;

pub use archive::entry_header;
pub use driver::{TarSum, TarSumConfig};
pub use error::{Result, TarSumError};
pub use tag::ChecksumTag;

pub use tarsum_core::{
    all_versions, label_of, version_of, CoreError, EntryHeader, HeaderField, HeaderSelector,
    OrderedFields, Version,
};
