//! The version registry: label and selection rule for every scheme version.
//!
//! The builtin table is a `static` and is never mutated, so lookups are safe
//! from any thread without locking.
//!
//! | Version | Label        | Rule |
//! |---------|--------------|------|
//! | `V0`    | `tarsum`     | v0   |
//! | `V1`    | `tarsum.v1`  | v1   |
//! | `Dev`   | `tarsum.dev` | v1   |
//!
//! Labels are a compatibility contract: changing one invalidates every
//! checksum already tagged with it.

use std::collections::BTreeSet;

use crate::error::CoreError;
use crate::select::HeaderSelector;
use crate::version::Version;

/// One row of a registry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    pub version: Version,
    pub label: &'static str,
    pub selector: HeaderSelector,
}

const BUILTIN_ENTRIES: &[RegistryEntry] = &[
    RegistryEntry {
        version: Version::V0,
        label: "tarsum",
        selector: HeaderSelector::V0,
    },
    RegistryEntry {
        version: Version::V1,
        label: "tarsum.v1",
        selector: HeaderSelector::V1,
    },
    RegistryEntry {
        version: Version::Dev,
        label: "tarsum.dev",
        selector: HeaderSelector::V1,
    },
];

static BUILTIN: VersionRegistry = VersionRegistry::new(BUILTIN_ENTRIES);

/// A fixed table of versions.
#[derive(Debug, Clone, Copy)]
pub struct VersionRegistry {
    entries: &'static [RegistryEntry],
}

impl VersionRegistry {
    /// Build a registry over `entries`.
    ///
    /// Each version and each label must appear at most once; the first match
    /// wins otherwise.
    pub const fn new(entries: &'static [RegistryEntry]) -> Self {
        Self { entries }
    }

    /// The registry every free function in this module uses.
    pub fn builtin() -> &'static VersionRegistry {
        &BUILTIN
    }

    pub fn entries(&self) -> &'static [RegistryEntry] {
        self.entries
    }

    fn entry(&self, version: Version) -> Option<&'static RegistryEntry> {
        self.entries.iter().find(|e| e.version == version)
    }

    /// The selection rule for `version`.
    ///
    /// There is no fallback rule: hashing with the wrong rule would produce a
    /// checksum that silently means something else.
    pub fn selector_for(&self, version: Version) -> Result<HeaderSelector, CoreError> {
        self.entry(version)
            .map(|e| e.selector)
            .ok_or(CoreError::UnimplementedVersion(version))
    }

    /// The checksum label for `version`, or `""` if it is not registered.
    pub fn label_for(&self, version: Version) -> &'static str {
        self.entry(version).map(|e| e.label).unwrap_or("")
    }

    /// The version whose label is exactly `label`.
    pub fn version_for(&self, label: &str) -> Result<Version, CoreError> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.version)
            .ok_or_else(|| CoreError::UnrecognizedVersionLabel(label.to_string()))
    }

    /// Every registered version.
    pub fn all_versions(&self) -> BTreeSet<Version> {
        self.entries.iter().map(|e| e.version).collect()
    }
}

/// Selection rule for `version` from the builtin registry.
pub fn selector_for(version: Version) -> Result<HeaderSelector, CoreError> {
    BUILTIN.selector_for(version)
}

/// Checksum label for `version` from the builtin registry.
pub fn label_for(version: Version) -> &'static str {
    BUILTIN.label_for(version)
}

/// Version for `label` from the builtin registry.
pub fn version_for(label: &str) -> Result<Version, CoreError> {
    BUILTIN.version_for(label)
}

/// Every version in the builtin registry.
pub fn all_versions() -> BTreeSet<Version> {
    BUILTIN.all_versions()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::EntryHeader;

    #[test]
    fn test_builtin_is_complete() {
        let versions = all_versions();
        assert_eq!(versions.len(), Version::ALL.len());
        for v in Version::ALL {
            assert!(versions.contains(&v));
        }
        for v in versions {
            selector_for(v).expect("every registered version has a selector");
            assert!(!label_for(v).is_empty());
        }
    }

    #[test]
    fn test_label_table() {
        assert_eq!(label_for(Version::V0), "tarsum");
        assert_eq!(label_for(Version::V1), "tarsum.v1");
        assert_eq!(label_for(Version::Dev), "tarsum.dev");

        assert_eq!(version_for("tarsum").unwrap(), Version::V0);
        assert_eq!(version_for("tarsum.v1").unwrap(), Version::V1);
        assert_eq!(version_for("tarsum.dev").unwrap(), Version::Dev);
    }

    #[test]
    fn test_version_for_is_exact() {
        for label in ["", "TARSUM", "tarsum.v1 ", "tarsum+sha256", "tarsum.v2"] {
            assert_eq!(
                version_for(label),
                Err(CoreError::UnrecognizedVersionLabel(label.to_string()))
            );
        }
    }

    #[test]
    fn test_dev_shares_v1_rule() {
        assert_eq!(selector_for(Version::V0).unwrap(), HeaderSelector::V0);
        assert_eq!(selector_for(Version::V1).unwrap(), HeaderSelector::V1);
        assert_eq!(selector_for(Version::Dev).unwrap(), HeaderSelector::V1);

        let h = EntryHeader::new("a").mtime(5).xattr("user.k", "v");
        assert_eq!(
            selector_for(Version::Dev).unwrap().select(&h),
            selector_for(Version::V1).unwrap().select(&h)
        );
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VersionRegistry>();
        assert_send_sync::<HeaderSelector>();
        assert_send_sync::<Version>();
    }

    #[test]
    fn test_unregistered_version() {
        static PARTIAL: &[RegistryEntry] = &[RegistryEntry {
            version: Version::V0,
            label: "tarsum",
            selector: HeaderSelector::V0,
        }];
        let registry = VersionRegistry::new(PARTIAL);

        assert_eq!(
            registry.selector_for(Version::Dev),
            Err(CoreError::UnimplementedVersion(Version::Dev))
        );
        assert_eq!(registry.label_for(Version::V1), "");
        assert!(registry.version_for("tarsum.v1").is_err());
        assert_eq!(registry.all_versions().into_iter().collect::<Vec<_>>(), vec![Version::V0]);
    }
}
