//! Building entry headers from `tar` archives.
//!
//! The `tar` crate already folds PAX `path`/`linkpath` and GNU long names into
//! the entry path and link name. Numeric fields are parsed here from the raw
//! header with one rule for all of them. The remaining PAX overrides that
//! affect hashed fields (`uid`, `gid`, `uname`, `gname`, `mtime`, `size`) are
//! applied here, and every PAX record is kept so that `SCHILY.xattr.*`
//! attributes reach the v1 rule.

use std::collections::BTreeMap;
use std::io::{self, Read};

use tar::{Archive, Entry};
use tracing::{trace, warn};

use tarsum_core::{EntryHeader, OrderedFields};

use crate::error::Result;
use crate::driver::TarSum;

/// Read the header of `entry`, with PAX overrides applied.
///
/// Numeric fields are read from the raw header bytes: a blank field is 0, and
/// anything that is neither octal nor base-256 is `InvalidData`.
pub fn entry_header<R: Read>(entry: &mut Entry<'_, R>) -> io::Result<EntryHeader> {
    let pax_records = pax_records(entry)?;

    let name = entry.path_bytes().into_owned();
    let header = entry.header();
    let old = header.as_old();
    let (dev_major, dev_minor): (&[u8], &[u8]) = match (header.as_ustar(), header.as_gnu()) {
        (Some(ustar), _) => (ustar.dev_major.as_slice(), ustar.dev_minor.as_slice()),
        (None, Some(gnu)) => (gnu.dev_major.as_slice(), gnu.dev_minor.as_slice()),
        (None, None) => (&[][..], &[][..]),
    };
    let number = |field: &[u8], what: &str| {
        numeric_field(field).map_err(|msg| {
            invalid(format!("{msg} in {what} of {}", String::from_utf8_lossy(&name)))
        })
    };

    let mut out = EntryHeader {
        mode: number(&old.mode[..], "mode")?,
        uid: number(&old.uid[..], "uid")?,
        gid: number(&old.gid[..], "gid")?,
        size: number(&old.size[..], "size")?,
        mtime: number(&old.mtime[..], "mtime")?,
        typeflag: header.entry_type().as_byte(),
        linkname: entry
            .link_name_bytes()
            .map(|l| l.into_owned())
            .unwrap_or_default(),
        uname: header.username_bytes().map(<[u8]>::to_vec).unwrap_or_default(),
        gname: header.groupname_bytes().map(<[u8]>::to_vec).unwrap_or_default(),
        devmajor: number(dev_major, "devmajor")?,
        devminor: number(dev_minor, "devminor")?,
        xattrs: BTreeMap::new(),
        pax_records: BTreeMap::new(),
        name,
    };
    apply_pax_overrides(&mut out, &pax_records)?;
    out.pax_records = pax_records;
    Ok(out)
}

fn pax_records<R: Read>(entry: &mut Entry<'_, R>) -> io::Result<BTreeMap<String, Vec<u8>>> {
    let mut records = BTreeMap::new();
    let Some(extensions) = entry.pax_extensions()? else {
        return Ok(records);
    };
    for extension in extensions {
        let extension = extension?;
        match extension.key() {
            Ok(key) => {
                records.insert(key.to_string(), extension.value_bytes().to_vec());
            }
            Err(_) => warn!(
                key = %String::from_utf8_lossy(extension.key_bytes()),
                "skipping PAX record with non-UTF-8 key"
            ),
        }
    }
    Ok(records)
}

fn apply_pax_overrides(h: &mut EntryHeader, records: &BTreeMap<String, Vec<u8>>) -> io::Result<()> {
    for (key, value) in records {
        match key.as_str() {
            "uid" => h.uid = parse_decimal(key, value)?,
            "gid" => h.gid = parse_decimal(key, value)?,
            "size" => h.size = parse_decimal(key, value)?,
            "mtime" => h.mtime = parse_pax_time(value)?,
            "uname" => h.uname = value.clone(),
            "gname" => h.gname = value.clone(),
            _ => {}
        }
    }
    Ok(())
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

/// Parse a raw numeric header field.
///
/// Octal fields may be padded with spaces and NULs on either side and end at
/// the first NUL; an all-padding field is 0. A leading byte with the high bit
/// set marks a big-endian base-256 number, negative when bit 6 is also set.
fn numeric_field(field: &[u8]) -> std::result::Result<i64, String> {
    if let Some(&first) = field.first() {
        if first & 0x80 != 0 {
            return base256_field(field);
        }
    }

    let is_pad = |b: &u8| *b == b' ' || *b == 0;
    let start = field.iter().position(|b| !is_pad(b)).unwrap_or(field.len());
    let end = field.iter().rposition(|b| !is_pad(b)).map_or(start, |i| i + 1);
    let digits = &field[start..end];
    let digits = digits.split(|b| *b == 0).next().unwrap_or_default();

    let mut value: i64 = 0;
    for &b in digits {
        if !(b'0'..=b'7').contains(&b) {
            return Err(format!(
                "invalid octal number {:?}",
                String::from_utf8_lossy(field)
            ));
        }
        value = value
            .checked_mul(8)
            .and_then(|v| v.checked_add(i64::from(b - b'0')))
            .ok_or_else(|| "octal number out of range".to_string())?;
    }
    Ok(value)
}

fn base256_field(field: &[u8]) -> std::result::Result<i64, String> {
    let overflow = || "base-256 number out of range".to_string();
    let inv = if field[0] & 0x40 != 0 { 0xff } else { 0x00 };
    let mut x: u64 = 0;
    for (i, &b) in field.iter().enumerate() {
        let mut c = b ^ inv;
        if i == 0 {
            c &= 0x7f;
        }
        if x >> 56 > 0 {
            return Err(overflow());
        }
        x = (x << 8) | u64::from(c);
    }
    let x = i64::try_from(x).map_err(|_| overflow())?;
    Ok(if inv == 0xff { !x } else { x })
}

fn parse_decimal(key: &str, value: &[u8]) -> io::Result<i64> {
    std::str::from_utf8(value)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| invalid(format!("invalid PAX {key} record")))
}

/// Parse a PAX time (`seconds[.fraction]`) to whole seconds, floored.
fn parse_pax_time(value: &[u8]) -> io::Result<i64> {
    let err = || invalid("invalid PAX mtime record".to_string());
    let s = std::str::from_utf8(value).map_err(|_| err())?;
    let (secs, frac) = s.split_once('.').unwrap_or((s, ""));
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err());
    }
    let secs: i64 = secs.parse().map_err(|_| err())?;
    if s.starts_with('-') && frac.bytes().any(|b| b != b'0') {
        return secs.checked_sub(1).ok_or_else(err);
    }
    Ok(secs)
}

impl TarSum {
    /// Select the header fields of every entry in `archive`, in archive order.
    ///
    /// Entry contents are skipped, not read.
    pub fn archive_fields<R: Read>(&self, archive: &mut Archive<R>) -> Result<Vec<OrderedFields>> {
        let mut out = Vec::new();
        for entry in archive.entries()? {
            let mut entry = entry?;
            let header = entry_header(&mut entry)?;
            trace!(
                name = %String::from_utf8_lossy(&header.name),
                typeflag = header.typeflag,
                "selecting entry header"
            );
            out.push(self.select(&header));
        }
        Ok(out)
    }
}
