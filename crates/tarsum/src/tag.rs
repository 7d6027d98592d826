//! Structured checksum tags: `{label}+{hash-id}:{hex-digest}`.

use std::fmt;
use std::str::FromStr;

use tarsum_core::{version_of, Version};

use crate::error::{Result, TarSumError};

/// A parsed or freshly built checksum tag.
///
/// The digest is kept as the text that appears after `:`. It is only decoded
/// on request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChecksumTag {
    pub version: Version,
    pub hash_id: String,
    pub digest: String,
}

impl ChecksumTag {
    /// Build a tag from raw digest bytes, hex-encoding them.
    pub fn new(version: Version, hash_id: impl Into<String>, digest: &[u8]) -> Self {
        Self {
            version,
            hash_id: hash_id.into(),
            digest: hex::encode(digest),
        }
    }

    /// Parse `{label}+{hash-id}:{digest}`.
    ///
    /// The label must be registered. The hash identifier and digest are
    /// taken verbatim.
    pub fn parse(s: &str) -> Result<Self> {
        let version = version_of(s)?;
        let (_, rest) = s
            .split_once('+')
            .ok_or_else(|| TarSumError::MalformedChecksum(s.to_string()))?;
        let (hash_id, digest) = rest
            .split_once(':')
            .ok_or_else(|| TarSumError::MalformedChecksum(s.to_string()))?;

        Ok(Self {
            version,
            hash_id: hash_id.to_string(),
            digest: digest.to_string(),
        })
    }

    /// Decode the digest from hex.
    pub fn digest_bytes(&self) -> std::result::Result<Vec<u8>, hex::FromHexError> {
        hex::decode(&self.digest)
    }
}

impl fmt::Display for ChecksumTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}:{}", self.version, self.hash_id, self.digest)
    }
}

impl FromStr for ChecksumTag {
    type Err = TarSumError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tarsum_core::CoreError;

    #[test]
    fn test_format() {
        let tag = ChecksumTag::new(Version::V1, "sha256", &[0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(tag.to_string(), "tarsum.v1+sha256:deadbeef");
    }

    #[test]
    fn test_parse() {
        let tag: ChecksumTag =
            "tarsum+sha256:e58fcf7418d4390dec8e8fb69d88c06ec07039d651fedd3aa72af9972e7d046b"
                .parse()
                .unwrap();
        assert_eq!(tag.version, Version::V0);
        assert_eq!(tag.hash_id, "sha256");
        assert_eq!(tag.digest_bytes().unwrap().len(), 32);
    }

    #[test]
    fn test_parse_keeps_digest_verbatim() {
        let tag = ChecksumTag::parse("tarsum.dev+sha512:not-hex:at+all").unwrap();
        assert_eq!(tag.version, Version::Dev);
        assert_eq!(tag.hash_id, "sha512");
        assert_eq!(tag.digest, "not-hex:at+all");
        assert!(tag.digest_bytes().is_err());
        assert_eq!(tag.to_string(), "tarsum.dev+sha512:not-hex:at+all");
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = ChecksumTag::parse("bogus+sha256:abc").unwrap_err();
        assert!(matches!(
            err,
            TarSumError::Core(CoreError::UnrecognizedVersionLabel(ref l)) if l == "bogus"
        ));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            ChecksumTag::parse("tarsum.v1"),
            Err(TarSumError::MalformedChecksum(_))
        ));
        assert!(matches!(
            ChecksumTag::parse("tarsum.v1+sha256"),
            Err(TarSumError::MalformedChecksum(_))
        ));
    }
}
