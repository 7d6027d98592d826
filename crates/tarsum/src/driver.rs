//! The TarSum driver: one resolved version applied to many entries.
//!
//! Callers hold a `TarSum` for the duration of an archive. The selection
//! rule is looked up once, at construction, so an unregistered version is
//! reported before any entry is hashed.

use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::debug;

use tarsum_core::{selector_for, version_of, EntryHeader, HeaderSelector, OrderedFields, Version};

use crate::error::{Result, TarSumError};
use crate::tag::ChecksumTag;

/// Configuration for a TarSum driver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TarSumConfig {
    /// Scheme version, written as its label (`"tarsum.v1"`).
    pub version: Version,
}

impl TarSumConfig {
    pub fn new(version: Version) -> Self {
        Self { version }
    }
}

/// Selects and writes entry headers under one scheme version.
#[derive(Debug, Clone)]
pub struct TarSum {
    config: TarSumConfig,
    selector: HeaderSelector,
}

impl TarSum {
    /// Create a driver, resolving the selection rule for the configured version.
    pub fn new(config: TarSumConfig) -> Result<Self> {
        let selector = selector_for(config.version)?;
        debug!(
            version = %config.version,
            selector = selector.name(),
            "resolved tarsum header selector"
        );
        Ok(Self { config, selector })
    }

    /// Create a driver for `version` with otherwise default configuration.
    pub fn for_version(version: Version) -> Result<Self> {
        Self::new(TarSumConfig::new(version))
    }

    /// Create a driver for the version named in an existing checksum.
    pub fn for_checksum(checksum: &str) -> Result<Self> {
        Self::for_version(version_of(checksum)?)
    }

    pub fn config(&self) -> &TarSumConfig {
        &self.config
    }

    pub fn version(&self) -> Version {
        self.config.version
    }

    /// Label used in checksum tags.
    pub fn label(&self) -> &'static str {
        self.config.version.label()
    }

    pub fn selector(&self) -> HeaderSelector {
        self.selector
    }

    /// Select and order the fields of one entry header.
    pub fn select(&self, header: &EntryHeader) -> OrderedFields {
        self.selector.select(header)
    }

    /// The bytes of `header` that go into the hash.
    pub fn header_bytes(&self, header: &EntryHeader) -> Vec<u8> {
        self.select(header).canonical_bytes()
    }

    /// Write the hashed bytes of `header` into `w`, typically a digest adapter.
    pub fn write_header<W: Write + ?Sized>(&self, header: &EntryHeader, w: &mut W) -> Result<usize> {
        Ok(self.selector.write_header(header, w)?)
    }

    /// Tag a finished digest with this driver's version.
    pub fn checksum_tag(&self, hash_id: &str, digest: &[u8]) -> ChecksumTag {
        ChecksumTag::new(self.config.version, hash_id, digest)
    }

    /// Check that `checksum` was produced under this driver's version.
    pub fn check_version(&self, checksum: &str) -> Result<()> {
        let found = version_of(checksum)?;
        if found != self.config.version {
            return Err(TarSumError::VersionMismatch {
                expected: self.config.version,
                found,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tarsum_core::CoreError;
    use tarsum_testkit::{entry_header, fixtures};

    #[test]
    fn test_default_config_is_v0() {
        let tarsum = TarSum::new(TarSumConfig::default()).unwrap();
        assert_eq!(tarsum.version(), Version::V0);
        assert_eq!(tarsum.label(), "tarsum");
        assert_eq!(tarsum.selector(), HeaderSelector::V0);
    }

    #[test]
    fn test_config_from_json() {
        let config: TarSumConfig = serde_json::from_str(r#"{"version":"tarsum.v1"}"#).unwrap();
        assert_eq!(config.version, Version::V1);

        let config: TarSumConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, TarSumConfig::default());

        assert!(serde_json::from_str::<TarSumConfig>(r#"{"version":"tarsum.v9"}"#).is_err());
    }

    #[test]
    fn test_for_checksum() {
        let tarsum = TarSum::for_checksum("tarsum.dev+sha256:00").unwrap();
        assert_eq!(tarsum.version(), Version::Dev);
        assert_eq!(tarsum.selector(), HeaderSelector::V1);

        let err = TarSum::for_checksum("bogus+sha256:00").unwrap_err();
        assert!(matches!(
            err,
            TarSumError::Core(CoreError::UnrecognizedVersionLabel(_))
        ));
    }

    #[test]
    fn test_write_header_matches_header_bytes() {
        let tarsum = TarSum::for_version(Version::V1).unwrap();
        let header = fixtures::overlapping_xattrs();

        let mut sink = Vec::new();
        let n = tarsum.write_header(&header, &mut sink).unwrap();
        assert_eq!(n, sink.len());
        assert_eq!(sink, tarsum.header_bytes(&header));
    }

    #[test]
    fn test_checksum_tag() {
        let tarsum = TarSum::for_version(Version::V1).unwrap();
        let tag = tarsum.checksum_tag("sha256", &[0xab; 4]);
        assert_eq!(tag.to_string(), "tarsum.v1+sha256:abababab");
    }

    #[test]
    fn test_driver_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TarSum>();
    }

    #[test]
    fn test_check_version() {
        let tarsum = TarSum::for_version(Version::V1).unwrap();
        tarsum.check_version("tarsum.v1+sha256:abc").unwrap();

        let err = tarsum.check_version("tarsum+sha256:abc").unwrap_err();
        assert!(matches!(
            err,
            TarSumError::VersionMismatch {
                expected: Version::V1,
                found: Version::V0
            }
        ));
    }

    proptest! {
        #[test]
        fn test_driver_streams_selected_bytes(
            header in entry_header(),
            version in prop::sample::select(Version::ALL.to_vec()),
        ) {
            let tarsum = TarSum::for_version(version).unwrap();
            let bytes = tarsum.header_bytes(&header);
            prop_assert_eq!(&bytes, &tarsum.select(&header).canonical_bytes());

            let mut sink = Vec::new();
            let written = tarsum.write_header(&header, &mut sink).unwrap();
            prop_assert_eq!(written, bytes.len());
            prop_assert_eq!(sink, bytes);
        }

        #[test]
        fn test_v1_and_dev_drivers_agree(header in entry_header()) {
            let v1 = TarSum::for_version(Version::V1).unwrap();
            let dev = TarSum::for_version(Version::Dev).unwrap();
            prop_assert_eq!(v1.header_bytes(&header), dev.header_bytes(&header));
        }
    }
}
