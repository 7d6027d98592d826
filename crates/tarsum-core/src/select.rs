//! Header selection: which fields of an entry header are hashed, and in
//! what order.
//!
//! Each scheme version owns one selection rule:
//!
//! - **v0**: twelve fixed fields, mtime included.
//! - **v1** (also used by dev): the v0 fields without mtime, followed by the
//!   entry's extended attributes sorted by name.
//!
//! Numbers are rendered in signed base 10 and strings are copied byte for
//! byte. Nothing is validated.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use crate::fields::OrderedFields;
use crate::header::EntryHeader;

/// PAX record prefix under which extended attributes are stored.
pub const PAX_SCHILY_XATTR: &str = "SCHILY.xattr.";

/// Number of fields produced by the v0 rule.
pub const V0_FIELD_COUNT: usize = 12;

/// Number of fixed fields produced by the v1 rule, before extended attributes.
pub const V1_BASE_FIELD_COUNT: usize = 11;

/// Index of `mtime` in the v0 field list.
const MTIME_INDEX: usize = 5;

/// Signature of a selection rule.
pub type SelectFn = fn(&EntryHeader) -> OrderedFields;

/// A named header selection rule.
///
/// Only the rules defined here exist, so two selectors with the same name are
/// the same rule. Other crates cannot mint new ones:
///
/// ```compile_fail
/// use tarsum_core::{EntryHeader, HeaderSelector, OrderedFields};
///
/// fn nothing(_: &EntryHeader) -> OrderedFields {
///     OrderedFields::with_capacity(0)
/// }
/// let _ = HeaderSelector::new("v1", nothing);
/// ```
#[derive(Clone, Copy)]
pub struct HeaderSelector {
    name: &'static str,
    select: SelectFn,
}

impl HeaderSelector {
    /// The v0 rule.
    pub const V0: HeaderSelector = HeaderSelector::new("v0", select_v0);

    /// The v1 rule.
    pub const V1: HeaderSelector = HeaderSelector::new("v1", select_v1);

    pub(crate) const fn new(name: &'static str, select: SelectFn) -> Self {
        Self { name, select }
    }

    /// Name of the rule, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Select and order the fields of `header`.
    pub fn select(&self, header: &EntryHeader) -> OrderedFields {
        (self.select)(header)
    }

    /// Write the selected fields of `header` into `w`.
    pub fn write_header<W: Write + ?Sized>(
        &self,
        header: &EntryHeader,
        w: &mut W,
    ) -> io::Result<usize> {
        self.select(header).write_to(w)
    }
}

impl fmt::Debug for HeaderSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeaderSelector({})", self.name)
    }
}

impl PartialEq for HeaderSelector {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for HeaderSelector {}

/// Write a header in v1 form.
pub fn write_v1_header<W: Write + ?Sized>(header: &EntryHeader, w: &mut W) -> io::Result<usize> {
    HeaderSelector::V1.write_header(header, w)
}

/// The v0 rule.
pub fn select_v0(h: &EntryHeader) -> OrderedFields {
    let mut fields = OrderedFields::with_capacity(V0_FIELD_COUNT);
    fields.push("name", h.name.as_slice());
    fields.push("mode", h.mode.to_string());
    fields.push("uid", h.uid.to_string());
    fields.push("gid", h.gid.to_string());
    fields.push("size", h.size.to_string());
    fields.push("mtime", h.mtime.to_string());
    fields.push("typeflag", vec![h.typeflag]);
    fields.push("linkname", h.linkname.as_slice());
    fields.push("uname", h.uname.as_slice());
    fields.push("gname", h.gname.as_slice());
    fields.push("devmajor", h.devmajor.to_string());
    fields.push("devminor", h.devminor.to_string());
    fields
}

/// The v1 rule.
pub fn select_v1(h: &EntryHeader) -> OrderedFields {
    let xattrs = merge_xattrs(&h.pax_records, &h.xattrs);

    let mut fields = OrderedFields::with_capacity(V1_BASE_FIELD_COUNT + xattrs.len());
    fields.extend(
        select_v0(h)
            .into_iter()
            .enumerate()
            .filter(|(i, _)| *i != MTIME_INDEX)
            .map(|(_, field)| field),
    );
    for (key, value) in xattrs {
        fields.push(key, value);
    }
    fields
}

/// Reconcile the two representations of an entry's extended attributes.
///
/// Every `SCHILY.xattr.<key>` PAX record contributes `<key>`; when the direct
/// mapping also has `<key>`, its value is used instead of the PAX value.
/// Direct entries without a matching PAX record are included as well. The
/// result holds each key once, sorted by byte-wise key order. Keys are
/// compared exactly; no case folding or Unicode normalization is applied.
pub fn merge_xattrs<'a>(
    pax_records: &'a BTreeMap<String, Vec<u8>>,
    xattrs: &'a BTreeMap<String, Vec<u8>>,
) -> Vec<(&'a str, &'a [u8])> {
    let mut merged: Vec<(&str, &[u8])> = pax_records
        .iter()
        .filter_map(|(key, pax_value)| {
            let attr = key.strip_prefix(PAX_SCHILY_XATTR)?;
            let value = xattrs.get(attr).unwrap_or(pax_value);
            Some((attr, value.as_slice()))
        })
        .collect();

    merged.extend(
        xattrs
            .iter()
            .filter(|(key, _)| !pax_records.contains_key(&format!("{PAX_SCHILY_XATTR}{key}")))
            .map(|(key, value)| (key.as_str(), value.as_slice())),
    );

    sort_xattrs(merged)
}

/// Put reconciled attributes into canonical order: ascending byte-wise key
/// order, independent of the order they were collected in.
pub fn sort_xattrs<'a>(mut attrs: Vec<(&'a str, &'a [u8])>) -> Vec<(&'a str, &'a [u8])> {
    attrs.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    attrs
}
