use std::{collections::BTreeMap, iter::FromIterator};

use serde::{Deserialize, Serialize};

use crate::Error;

/// A multi-valued map from a string key to an ordered list of strings.
///
/// A key that has had its last value removed is deleted outright: callers will
/// never observe an empty list through [`StringListMap::keys()`] or
/// [`StringListMap::get()`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct StringListMap(BTreeMap<String, Vec<String>>);

impl StringListMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every key that currently holds at least one value.
    pub fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _values)| key.to_string()).collect()
    }

    /// Returns the list for `key`, inserting an empty one if it doesn't exist.
    ///
    /// An entry created here and left empty is invisible to the read methods
    /// and is dropped by [`StringListMap::prune()`].
    pub fn get_or_create(&mut self, key: &str) -> &mut Vec<String> {
        self.0.entry(key.to_string()).or_default()
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        match self.0.get(key) {
            Some(values) if !values.is_empty() => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn has_value(&self, key: &str, value: &str) -> bool {
        self.index_of(key, value).is_some()
    }

    /// Appends the given values to `key`, duplicates included.
    pub fn add<I>(&mut self, key: &str, values: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for value in values {
            self.get_or_create(key).push(value.as_ref().to_string());
        }
    }

    /// Appends each value that `key` doesn't already hold.
    ///
    /// Each value is checked against the list as it stands after the previous
    /// values were appended, so duplicates within `values` are only added once.
    pub fn add_unique<I>(&mut self, key: &str, values: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for value in values {
            let value = value.as_ref();
            if !self.has_value(key, value) {
                self.get_or_create(key).push(value.to_string());
            }
        }
    }

    pub fn index_of(&self, key: &str, value: &str) -> Option<usize> {
        self.0
            .get(key)
            .and_then(|values| values.iter().position(|v| v == value))
    }

    /// Removes the value at `index` from the list for `key`.
    ///
    /// Removing from a key that doesn't exist is a no-op.
    pub fn remove_at(&mut self, key: &str, index: usize) -> Result<(), Error> {
        let values = match self.0.get_mut(key) {
            Some(values) => values,
            None => return Ok(()),
        };

        if index >= values.len() {
            return Err(Error::OutOfRange {
                index,
                len: values.len(),
            });
        }

        values.remove(index);
        if values.is_empty() {
            self.0.remove(key);
        }

        Ok(())
    }

    /// Removes the first occurrence of `value` from `key`, returning whether
    /// anything was removed.
    pub fn remove_first(&mut self, key: &str, value: &str) -> bool {
        match self.index_of(key, value) {
            Some(index) => self.remove_at(key, index).is_ok(),
            None => false,
        }
    }

    /// Removes `key` entirely, returning its values if it held any.
    pub fn remove_key(&mut self, key: &str) -> Option<Vec<String>> {
        self.0.remove(key).filter(|values| !values.is_empty())
    }

    /// Replaces the list for `key`. An empty list removes the key.
    pub fn insert(&mut self, key: &str, values: Vec<String>) {
        if values.is_empty() {
            self.0.remove(key);
        } else {
            self.0.insert(key.to_string(), values);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .filter(|(_key, values)| !values.is_empty())
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every key whose list is empty.
    pub(crate) fn prune(&mut self) {
        self.0.retain(|_key, values| !values.is_empty());
    }

    pub(crate) fn sort_values(&mut self) {
        for values in self.0.values_mut() {
            values.sort();
        }
    }
}

impl<K, V> FromIterator<(K, V)> for StringListMap
where
    K: Into<String>,
    V: IntoIterator,
    V::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, values)| (key.into(), values.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}
