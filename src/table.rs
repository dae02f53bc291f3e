#[cfg(test)]
#[path = "./table_tests.rs"]
mod tests;

use crate::{Error, ErrorKind, Span, Spanned, Value};
use std::borrow::Cow;
use std::collections::hash_map;

#[derive(Clone)]
struct Entry {
    /// Span of the key that first defined this entry.
    key_span: Span,
    value: Value,
}

/// A table: unique string keys mapped to [`Value`]s.
///
/// Iteration order is unspecified and need not match source order. Each
/// entry remembers the span of the key that defined it, which is what
/// duplicate-key diagnostics point back at. Equality ignores spans.
#[derive(Clone, Default)]
pub struct Table {
    entries: foldhash::HashMap<String, Entry>,
}

impl Table {
    /// Creates an empty table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if the table contains the key.
    #[inline]
    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns a reference to the value for `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|e| &e.value)
    }

    /// Returns a mutable reference to the value for `name`.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries.get_mut(name).map(|e| &mut e.value)
    }

    /// Returns the span of the key that defined `name`.
    ///
    /// Entries added through [`insert`](Self::insert) have an empty span.
    pub fn get_key_span(&self, name: &str) -> Option<Span> {
        self.entries.get(name).map(|e| e.key_span)
    }

    /// Inserts a value, returning the previous value for `name` if any.
    ///
    /// Like any map insert this **overwrites**. The parser never relies on
    /// that; redefinitions in a document are reported as
    /// [`ErrorKind::DuplicateKey`].
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.entries
            .insert(
                name.into(),
                Entry {
                    key_span: Span::default(),
                    value,
                },
            )
            .map(|e| e.value)
    }

    /// Inserts a value defined by the key at `key_span`. The caller has
    /// already checked that `name` is absent.
    pub(crate) fn insert_spanned(&mut self, name: String, key_span: Span, value: Value) {
        debug_assert!(!self.entries.contains_key(&name), "duplicate insert of {name}");
        self.entries.insert(name, Entry { key_span, value });
    }

    /// Removes `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name).map(|e| e.value)
    }

    /// Returns the sub-table stored at `key`, inserting an empty one if the
    /// key is absent.
    ///
    /// Fails with [`ErrorKind::NotATable`] when the key already holds a
    /// value of another type.
    pub(crate) fn subtable_or_insert(
        &mut self,
        key: &Spanned<Cow<'_, str>>,
    ) -> Result<&mut Table, Error> {
        let entry = self
            .entries
            .entry(key.value.as_ref().to_owned())
            .or_insert_with(|| Entry {
                key_span: key.span,
                value: Value::Table(Table::new()),
            });
        match &mut entry.value {
            Value::Table(table) => Ok(table),
            _ => Err(Error {
                kind: ErrorKind::NotATable {
                    key: key.value.to_string(),
                    first: entry.key_span,
                },
                span: key.span,
                location: key.location,
            }),
        }
    }

    /// Returns an iterator over the entries, in unspecified order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// Returns an iterator over the key names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values().map(|e| &e.value)
    }

    /// Returns an iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.values_mut().map(|e| &mut e.value)
    }

    /// Key names in sorted order, for deterministic output.
    pub(crate) fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        keys
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(k, e)| other.get(k) == Some(&e.value))
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for key in self.sorted_keys() {
            map.entry(&key, &self.entries[key].value);
        }
        map.finish()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Table {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut table = Table::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}

/// Borrowing iterator over the entries of a [`Table`].
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, e)| (k.as_str(), &e.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Table {
    type Item = (&'a str, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Consuming iterator over the entries of a [`Table`].
pub struct IntoIter {
    inner: hash_map::IntoIter<String, Entry>,
}

impl Iterator for IntoIter {
    type Item = (String, Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, e)| (k, e.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IntoIter {}

impl IntoIterator for Table {
    type Item = (String, Value);
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}
