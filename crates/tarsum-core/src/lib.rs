//! # TarSum Core
//!
//! Versioned canonicalization of tar entry headers.
//!
//! For each archive entry a selector picks header fields, renders them as
//! strings and fixes their order. The caller concatenates every field name
//! and value, without separators, into a running hash. Two archives that
//! differ only in serialization details (padding, PAX record order) hash
//! identically.
//!
//! This crate contains no archive reading and no hashing. It is pure
//! computation over an [`EntryHeader`].
//!
//! ## Key Types
//!
//! - [`Version`] - Scheme version, identified in checksums by its label
//! - [`VersionRegistry`] - Label and selection rule per version
//! - [`HeaderSelector`] - A selection rule
//! - [`OrderedFields`] - The selected fields of one entry
//!
//! ## Example
//!
//! ```rust
//! use tarsum_core::{selector_for, version_of, EntryHeader, Version};
//!
//! let header = EntryHeader::new("etc/motd").mode(0o644).size(12).typeflag(b'0');
//! let selector = selector_for(Version::V1).unwrap();
//! let fields = selector.select(&header);
//! assert_eq!(fields.len(), 11);
//!
//! assert_eq!(version_of("tarsum.v1+sha256:00").unwrap(), Version::V1);
//! ```

pub mod checksum;
pub mod error;
pub mod fields;
pub mod header;
pub mod registry;
pub mod select;
pub mod version;

pub use checksum::{label_of, version_of};
pub use error::CoreError;
pub use fields::{HeaderField, OrderedFields};
pub use header::EntryHeader;
pub use registry::{
    all_versions, label_for, selector_for, version_for, RegistryEntry, VersionRegistry,
};
pub use select::{
    merge_xattrs, select_v0, select_v1, sort_xattrs, write_v1_header, HeaderSelector,
    PAX_SCHILY_XATTR,
};
pub use version::Version;
