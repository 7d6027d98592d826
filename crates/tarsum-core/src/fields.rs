//! Ordered header fields: the output of a selector.

use std::io::{self, Write};

/// One selected `(name, value)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HeaderField {
    pub name: String,
    pub value: Vec<u8>,
}

impl HeaderField {
    pub fn new(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The ordered field list produced for one entry.
///
/// Order is part of the checksum identity: fields are hashed exactly in the
/// sequence held here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OrderedFields(Vec<HeaderField>);

impl OrderedFields {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.0.push(HeaderField::new(name, value));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HeaderField> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[HeaderField] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<HeaderField> {
        self.0
    }

    /// Field names in order.
    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|f| f.name.as_str()).collect()
    }

    /// Value of the first field called `name`.
    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.0
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_slice())
    }

    /// The bytes that are fed to the hash: each name immediately followed by
    /// its value, with no separators.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let len = self.0.iter().map(|f| f.name.len() + f.value.len()).sum();
        let mut buf = Vec::with_capacity(len);
        for field in &self.0 {
            buf.extend_from_slice(field.name.as_bytes());
            buf.extend_from_slice(&field.value);
        }
        buf
    }

    /// Write the canonical bytes into `w`, returning the number of bytes written.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        let mut written = 0;
        for field in &self.0 {
            w.write_all(field.name.as_bytes())?;
            w.write_all(&field.value)?;
            written += field.name.len() + field.value.len();
        }
        Ok(written)
    }
}

impl From<Vec<HeaderField>> for OrderedFields {
    fn from(fields: Vec<HeaderField>) -> Self {
        Self(fields)
    }
}

impl Extend<HeaderField> for OrderedFields {
    fn extend<I: IntoIterator<Item = HeaderField>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for OrderedFields {
    type Item = HeaderField;
    type IntoIter = std::vec::IntoIter<HeaderField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a OrderedFields {
    type Item = &'a HeaderField;
    type IntoIter = std::slice::Iter<'a, HeaderField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
