//! Proptest generators for property-based testing.

use proptest::prelude::*;
use std::collections::BTreeMap;

use tarsum_core::{merge_xattrs, EntryHeader, PAX_SCHILY_XATTR};

/// Attribute map keyed by bare name or PAX key.
pub type AttrMap = BTreeMap<String, Vec<u8>>;

/// Arbitrary bytes for text fields.
pub fn text() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=32)
}

/// An entry path: usually path-like, sometimes arbitrary bytes.
pub fn entry_name() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        3 => "[a-z0-9_.-]{1,12}(/[a-z0-9_.-]{1,12}){0,4}/?".prop_map(String::into_bytes),
        1 => text(),
    ]
}

/// An extended attribute name such as `user.mime_type`.
pub fn xattr_key() -> impl Strategy<Value = String> {
    "(user|trusted|security|system|User)\\.[a-zA-Z0-9._-]{0,12}".prop_map(String::from)
}

/// An extended attribute value.
pub fn xattr_value() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=16)
}

/// PAX records that are not extended attributes.
pub fn plain_pax_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("path"),
        Just("mtime"),
        Just("uname"),
        Just("LIBARCHIVE.xattr.user.x"),
    ]
    .prop_map(String::from)
}

/// Where one attribute lives: `(pax value, direct value)`, at least one set.
fn attr_presence() -> impl Strategy<Value = (Option<Vec<u8>>, Option<Vec<u8>>)> {
    prop_oneof![
        xattr_value().prop_map(|v| (Some(v), None)),
        xattr_value().prop_map(|v| (None, Some(v))),
        (xattr_value(), xattr_value()).prop_map(|(p, d)| (Some(p), Some(d))),
    ]
}

/// Both attribute sources of a header, as `(xattrs, pax_records)`.
///
/// Attributes are spread over the PAX and direct mappings, some in both with
/// differing values, and the PAX side also carries unrelated records.
pub fn xattr_sources() -> impl Strategy<Value = (AttrMap, AttrMap)> {
    (
        prop::collection::btree_map(xattr_key(), attr_presence(), 0..8),
        prop::collection::btree_map(plain_pax_key(), text(), 0..3),
    )
        .prop_map(|(attrs, mut pax_records)| {
            let mut xattrs = AttrMap::new();
            for (key, (pax_value, direct_value)) in attrs {
                if let Some(v) = pax_value {
                    pax_records.insert(format!("{PAX_SCHILY_XATTR}{key}"), v);
                }
                if let Some(v) = direct_value {
                    xattrs.insert(key, v);
                }
            }
            (xattrs, pax_records)
        })
}

/// A fully arbitrary entry header.
pub fn entry_header() -> impl Strategy<Value = EntryHeader> {
    (
        (
            entry_name(),
            any::<i64>(),
            any::<i64>(),
            any::<i64>(),
            any::<i64>(),
            any::<i64>(),
            any::<u8>(),
        ),
        (text(), text(), text(), any::<i64>(), any::<i64>()),
        xattr_sources(),
    )
        .prop_map(
            |(
                (name, mode, uid, gid, size, mtime, typeflag),
                (linkname, uname, gname, devmajor, devminor),
                (xattrs, pax_records),
            )| EntryHeader {
                name,
                mode,
                uid,
                gid,
                size,
                mtime,
                typeflag,
                linkname,
                uname,
                gname,
                devmajor,
                devminor,
                xattrs,
                pax_records,
            },
        )
}

/// Owned attribute pairs in collection order.
pub type AttrPairs = Vec<(String, Vec<u8>)>;

/// The pairs `merge_xattrs` reconciles from `(xattrs, pax)`, in canonical order,
/// alongside the same pairs in an arbitrary order.
pub fn reconciled_and_permuted() -> impl Strategy<Value = (AttrPairs, AttrPairs)> {
    xattr_sources().prop_flat_map(|(xattrs, pax)| {
        let reconciled: AttrPairs = merge_xattrs(&pax, &xattrs)
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_vec()))
            .collect();
        (Just(reconciled.clone()), Just(reconciled).prop_shuffle())
    })
}

/// Borrow owned pairs in the shape `merge_xattrs` returns.
pub fn borrow_pairs(pairs: &[(String, Vec<u8>)]) -> Vec<(&str, &[u8])> {
    pairs.iter().map(|(k, v)| (k.as_str(), v.as_slice())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use tarsum_core::{select_v0, select_v1, selector_for, sort_xattrs, Version};

    const V0_NAMES: [&str; 12] = [
        "name", "mode", "uid", "gid", "size", "mtime", "typeflag", "linkname", "uname", "gname",
        "devmajor", "devminor",
    ];

    fn reconciled_keys(h: &EntryHeader) -> BTreeSet<String> {
        let mut keys: BTreeSet<String> = h.xattrs.keys().cloned().collect();
        keys.extend(
            h.pax_records
                .keys()
                .filter_map(|k| k.strip_prefix(PAX_SCHILY_XATTR))
                .map(String::from),
        );
        keys
    }

    proptest! {
        #[test]
        fn test_v0_names_fixed(h in entry_header()) {
            let fields = select_v0(&h);
            prop_assert_eq!(fields.names(), V0_NAMES.to_vec());
        }

        #[test]
        fn test_v1_names_are_base_then_sorted_xattrs(h in entry_header()) {
            let fields = select_v1(&h);
            let keys = reconciled_keys(&h);
            prop_assert_eq!(fields.len(), 11 + keys.len());

            let names = fields.names();
            let base: Vec<&str> = V0_NAMES.iter().copied().filter(|n| *n != "mtime").collect();
            prop_assert_eq!(&names[..11], &base[..]);

            let tail: Vec<&str> = names[11..].to_vec();
            let expected: Vec<&str> = keys.iter().map(String::as_str).collect();
            prop_assert_eq!(tail, expected);
        }

        #[test]
        fn test_selection_idempotent(h in entry_header()) {
            for version in Version::ALL {
                let selector = selector_for(version).unwrap();
                let a = selector.select(&h).canonical_bytes();
                let b = selector.select(&h).canonical_bytes();
                prop_assert_eq!(a, b);
            }
        }

        #[test]
        fn test_direct_xattr_takes_precedence(h in entry_header()) {
            let fields = select_v1(&h);
            for (key, direct) in &h.xattrs {
                prop_assert_eq!(fields.get(key), Some(direct.as_slice()));
            }
        }

        #[test]
        fn test_pax_only_xattr_keeps_pax_value(h in entry_header()) {
            let fields = select_v1(&h);
            for (key, value) in &h.pax_records {
                if let Some(attr) = key.strip_prefix(PAX_SCHILY_XATTR) {
                    if !h.xattrs.contains_key(attr) {
                        prop_assert_eq!(fields.get(attr), Some(value.as_slice()));
                    }
                }
            }
        }

        #[test]
        fn test_mtime_excluded_from_v1(h in entry_header(), other in any::<i64>()) {
            prop_assume!(other != h.mtime);
            let mut moved = h.clone();
            moved.mtime = other;
            prop_assert_eq!(select_v1(&h), select_v1(&moved));
            prop_assert_ne!(select_v0(&h), select_v0(&moved));
        }

        #[test]
        fn test_merge_ignores_source_order(
            (reconciled, permuted) in reconciled_and_permuted()
        ) {
            prop_assert_eq!(sort_xattrs(borrow_pairs(&permuted)), borrow_pairs(&reconciled));
        }
    }
}
