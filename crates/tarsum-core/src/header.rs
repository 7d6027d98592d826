//! The archive entry header consumed by the selectors.
//!
//! `EntryHeader` is a plain record filled in by whatever reads the archive.
//! Selectors only read it. Text fields are raw bytes because tar names are
//! not required to be UTF-8, and numeric fields are signed so that whatever
//! the reader produced passes through unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Metadata of a single archive entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryHeader {
    /// Entry path.
    pub name: Vec<u8>,

    /// Permission and mode bits.
    pub mode: i64,

    /// Owner user id.
    pub uid: i64,

    /// Owner group id.
    pub gid: i64,

    /// Content size in bytes.
    pub size: i64,

    /// Modification time, seconds since the Unix epoch (UTC).
    pub mtime: i64,

    /// Entry type flag byte (`b'0'` regular file, `b'5'` directory, ...).
    pub typeflag: u8,

    /// Link target for hard and symbolic links.
    pub linkname: Vec<u8>,

    /// Owner user name.
    pub uname: Vec<u8>,

    /// Owner group name.
    pub gname: Vec<u8>,

    /// Device major number.
    pub devmajor: i64,

    /// Device minor number.
    pub devminor: i64,

    /// Extended attributes keyed by bare attribute name (`user.foo`).
    pub xattrs: BTreeMap<String, Vec<u8>>,

    /// PAX extended header records, including `SCHILY.xattr.*` entries.
    pub pax_records: BTreeMap<String, Vec<u8>>,
}

impl EntryHeader {
    /// Create a header for `name` with every other field zeroed.
    pub fn new(name: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the mode bits.
    pub fn mode(mut self, mode: i64) -> Self {
        self.mode = mode;
        self
    }

    /// Set the owner ids.
    pub fn owner(mut self, uid: i64, gid: i64) -> Self {
        self.uid = uid;
        self.gid = gid;
        self
    }

    /// Set the owner names.
    pub fn owner_names(mut self, uname: impl Into<Vec<u8>>, gname: impl Into<Vec<u8>>) -> Self {
        self.uname = uname.into();
        self.gname = gname.into();
        self
    }

    /// Set the content size.
    pub fn size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    /// Set the modification time in epoch seconds.
    pub fn mtime(mut self, secs: i64) -> Self {
        self.mtime = secs;
        self
    }

    /// Set the modification time from a `SystemTime`.
    ///
    /// Sub-second precision is dropped by flooring, so pre-epoch times round
    /// towards negative infinity.
    pub fn modified(mut self, time: SystemTime) -> Self {
        self.mtime = epoch_seconds(time);
        self
    }

    /// Set the type flag byte.
    pub fn typeflag(mut self, flag: u8) -> Self {
        self.typeflag = flag;
        self
    }

    /// Set the link target.
    pub fn linkname(mut self, target: impl Into<Vec<u8>>) -> Self {
        self.linkname = target.into();
        self
    }

    /// Set the device numbers.
    pub fn device(mut self, major: i64, minor: i64) -> Self {
        self.devmajor = major;
        self.devminor = minor;
        self
    }

    /// Add a directly mapped extended attribute.
    pub fn xattr(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.xattrs.insert(key.into(), value.into());
        self
    }

    /// Add a PAX record.
    pub fn pax_record(mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.pax_records.insert(key.into(), value.into());
        self
    }
}

/// Whole seconds since the Unix epoch, floored.
fn epoch_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(e) => seconds_before_epoch(e.duration()),
    }
}

/// Floor of `-before` in whole seconds, saturating at `i64::MIN`.
fn seconds_before_epoch(before: Duration) -> i64 {
    let secs = i64::try_from(before.as_secs()).map_or(i64::MIN, |s| -s);
    if before.subsec_nanos() > 0 {
        secs.saturating_sub(1)
    } else {
        secs
    }
}
