use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier of a single step. Unique within a form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepKey(String);

impl StepKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Borrow<str> for StepKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for StepKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<String> for StepKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for StepKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Ordered binding from step key to the field names that gate leaving it.
///
/// Step order is insertion order. Re-inserting an existing key keeps its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepFieldMap {
    entries: IndexMap<StepKey, Vec<String>>,
}

impl StepFieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step<I, S>(mut self, key: impl Into<StepKey>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, fields);
        self
    }

    pub fn insert<I, S>(&mut self, key: impl Into<StepKey>, fields: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(key.into(), fields.into_iter().map(Into::into).collect())
    }

    /// Removes a step, keeping the relative order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        self.entries.shift_remove(key)
    }

    pub fn fields(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn fields_mut(&mut self, key: &str) -> Option<&mut Vec<String>> {
        self.entries.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.get_index_of(key)
    }

    pub fn key_at(&self, index: usize) -> Option<&StepKey> {
        self.entries.get_index(index).map(|(key, _)| key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &StepKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StepKey, &[String])> {
        self.entries
            .iter()
            .map(|(key, fields)| (key, fields.as_slice()))
    }

    /// Every field of every step, in step order, without duplicates.
    pub fn all_fields(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for field in self.entries.values().flatten() {
            if !out.contains(field) {
                out.push(field.clone());
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, I, S> FromIterator<(K, I)> for StepFieldMap
where
    K: Into<StepKey>,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, fields) in iter {
            map.insert(key, fields);
        }
        map
    }
}

impl From<IndexMap<String, Vec<String>>> for StepFieldMap {
    fn from(value: IndexMap<String, Vec<String>>) -> Self {
        value.into_iter().collect()
    }
}
