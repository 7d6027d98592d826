//! # TarSum Testkit
//!
//! Testing utilities for TarSum.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known headers with the exact canonical bytes each version must produce
//! - **Generators**: Proptest strategies for entry headers and their extended attributes
//! - **Fixtures**: Ready-made headers for common entry shapes
//!
//! ## Golden Vectors
//!
//! ```rust
//! use tarsum_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, hex) in verify_all_vectors() {
//!     assert!(matches, "{name}: {hex}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use tarsum_testkit::generators::entry_header;
//!
//! proptest! {
//!     #[test]
//!     fn v1_never_hashes_mtime(h in entry_header()) {
//!         prop_assert!(tarsum_core::select_v1(&h).get("mtime").is_none());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use tarsum_testkit::fixtures;
//!
//! let header = fixtures::symlink("bin/sh", "busybox");
//! assert_eq!(header.typeflag, b'2');
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::all_fixtures;
pub use generators::{entry_header, xattr_sources};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
