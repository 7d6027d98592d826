//! Golden test vectors for deterministic verification.
//!
//! Each vector pins the exact canonical header bytes a version must produce
//! for a fixture. Any change here is a checksum compatibility break.

use tarsum_core::{selector_for, EntryHeader, Version};

use crate::fixtures;

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Scheme version under test.
    pub version: Version,
    /// Builds the input header.
    pub header: fn() -> EntryHeader,
    /// Expected canonical header bytes (hex).
    pub expected_canonical: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "v0_regular_file",
            version: Version::V0,
            header: fixtures::regular_file,
            // "nameusr/bin/envmode493uid0gid0size27000mtime1388534400typeflag0
            //  linknameunamerootgnamerootdevmajor0devminor0"
            expected_canonical: "6e616d657573722f62696e2f656e766d6f6465343933756964306769643073697a6532373030306d74696d653133383835333434303074797065666c6167306c696e6b6e616d65756e616d65726f6f74676e616d65726f6f746465766d616a6f72306465766d696e6f7230",
        },
        GoldenVector {
            name: "v1_regular_file",
            version: Version::V1,
            header: fixtures::regular_file,
            expected_canonical: "6e616d657573722f62696e2f656e766d6f6465343933756964306769643073697a65323730303074797065666c6167306c696e6b6e616d65756e616d65726f6f74676e616d65726f6f746465766d616a6f72306465766d696e6f7230",
        },
        GoldenVector {
            name: "v1_xattr_merge",
            version: Version::V1,
            header: fixtures::overlapping_xattrs,
            // ...devminor0security.selinuxsystem_u:object_r:var_lib_t:s0
            //    trusted.overlay.opaqueyuser.testb
            expected_canonical: "6e616d657661722f6c69622f6170706d6f6465343438756964313030306769643130303073697a653074797065666c6167356c696e6b6e616d65756e616d65617070676e616d656170706465766d616a6f72306465766d696e6f723073656375726974792e73656c696e757873797374656d5f753a6f626a6563745f723a7661725f6c69625f743a7330747275737465642e6f7665726c61792e6f706171756579757365722e7465737462",
        },
        GoldenVector {
            name: "dev_symlink",
            version: Version::Dev,
            header: || fixtures::symlink("bin/sh", "busybox").mtime(1),
            expected_canonical: "6e616d6562696e2f73686d6f6465353131756964306769643073697a653074797065666c6167326c696e6b6e616d6562757379626f78756e616d65676e616d656465766d616a6f72306465766d696e6f7230",
        },
        GoldenVector {
            name: "v0_char_device",
            version: Version::V0,
            header: || fixtures::char_device("dev/null", 1, 3).mtime(0),
            expected_canonical: "6e616d656465762f6e756c6c6d6f6465343338756964306769643073697a65306d74696d653074797065666c6167336c696e6b6e616d65756e616d65676e616d656465766d616a6f72316465766d696e6f7233",
        },
        GoldenVector {
            name: "v1_empty",
            version: Version::V1,
            header: EntryHeader::default,
            // typeflag is a single NUL byte
            expected_canonical: "6e616d656d6f646530756964306769643073697a653074797065666c6167006c696e6b6e616d65756e616d65676e616d656465766d616a6f72306465766d696e6f7230",
        },
    ]
}

/// Canonical bytes produced for a vector by this implementation.
pub fn canonical_bytes_for(vector: &GoldenVector) -> Vec<u8> {
    let selector = selector_for(vector.version).expect("golden vectors use registered versions");
    selector.select(&(vector.header)()).canonical_bytes()
}

/// Check every vector, returning `(name, matches, actual hex)`.
///
/// Call this to verify your implementation matches the reference.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let hex = hex::encode(canonical_bytes_for(v));
            (v.name.to_string(), hex == v.expected_canonical, hex)
        })
        .collect()
}
