//! Header fixtures for common entry shapes.

use tarsum_core::EntryHeader;

/// 2014-01-01T00:00:00Z.
pub const FIXTURE_MTIME: i64 = 1_388_534_400;

/// A root-owned executable.
pub fn regular_file() -> EntryHeader {
    EntryHeader::new("usr/bin/env")
        .mode(0o755)
        .owner(0, 0)
        .owner_names("root", "root")
        .size(27_000)
        .mtime(FIXTURE_MTIME)
        .typeflag(b'0')
}

/// A user-owned directory.
pub fn directory(name: &str) -> EntryHeader {
    EntryHeader::new(name)
        .mode(0o755)
        .owner(1000, 1000)
        .owner_names("app", "app")
        .mtime(FIXTURE_MTIME)
        .typeflag(b'5')
}

/// A symbolic link to `target`.
pub fn symlink(name: &str, target: &str) -> EntryHeader {
    EntryHeader::new(name)
        .mode(0o777)
        .mtime(FIXTURE_MTIME)
        .typeflag(b'2')
        .linkname(target)
}

/// A character device node.
pub fn char_device(name: &str, major: i64, minor: i64) -> EntryHeader {
    EntryHeader::new(name)
        .mode(0o666)
        .mtime(FIXTURE_MTIME)
        .typeflag(b'3')
        .device(major, minor)
}

/// A directory whose attributes arrive through both representations.
///
/// `user.test` is present in both with different values; the direct value
/// `"b"` is the one that must be hashed.
pub fn overlapping_xattrs() -> EntryHeader {
    directory("var/lib/app")
        .mode(0o700)
        .mtime(1_700_000_000)
        .pax_record("SCHILY.xattr.user.test", "a")
        .pax_record(
            "SCHILY.xattr.security.selinux",
            "system_u:object_r:var_lib_t:s0",
        )
        .xattr("user.test", "b")
        .xattr("trusted.overlay.opaque", "y")
}

/// Every fixture, named.
pub fn all_fixtures() -> Vec<(&'static str, EntryHeader)> {
    vec![
        ("regular_file", regular_file()),
        ("directory", directory("etc/")),
        ("symlink", symlink("bin/sh", "busybox")),
        ("char_device", char_device("dev/null", 1, 3)),
        ("overlapping_xattrs", overlapping_xattrs()),
        ("empty", EntryHeader::default()),
    ]
}
