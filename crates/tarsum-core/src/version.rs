//! TarSum scheme versions.
//!
//! A checksum string carries its version as a label prefix, e.g.
//! `tarsum+sha256:e58fcf7418d4390dec8e8fb69d88c06ec07039d651fedd3aa72af9972e7d046b`.
//! The label table lives in [`crate::registry`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::registry;

/// A version of the TarSum canonicalization scheme.
///
/// The set is closed. `Dev` is the latest or unsettled next version; its rule
/// may change without affecting the meaning of `V1` checksums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
    /// The original scheme: twelve header fields, mtime included.
    #[default]
    V0,
    /// mtime dropped, extended attributes appended in sorted order.
    V1,
    /// Development version. Currently identical to `V1`.
    Dev,
}

impl Version {
    /// Every version constant.
    pub const ALL: [Version; 3] = [Version::V0, Version::V1, Version::Dev];

    /// The label used in checksum strings.
    ///
    /// Returns the empty string if the version is missing from the builtin
    /// registry.
    pub fn label(self) -> &'static str {
        registry::label_for(self)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Version {
    type Err = CoreError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        registry::version_for(label)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Version {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
