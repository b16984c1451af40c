//! Map container (BASKIT)

use std::collections::HashMap;

use super::Bukkit;
use crate::error::{Result, StdlibError};
use crate::value::Value;

/// A string-keyed map of values.
///
/// Keys are canonicalized: any value is stored under its canonical string
/// rendering, so `123` and `"123"` address the same entry. Projections
/// (`keys`, `values`, `pairs`) are always in ascending byte order of keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baskit {
    entries: HashMap<String, Value>,
}

/// Canonical key for a value.
pub fn canonical_key(key: &Value) -> String {
    match key {
        Value::String(s) => String::clone(s),
        other => other.to_string(),
    }
}

impl Baskit {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite.
    pub fn put(&mut self, key: &Value, value: Value) {
        self.entries.insert(canonical_key(key), value);
    }

    /// Look up a key.
    pub fn get(&self, key: &Value) -> Result<Value> {
        let key = canonical_key(key);
        self.entries
            .get(&key)
            .cloned()
            .ok_or(StdlibError::KeyNotFound { key })
    }

    /// Whether the key is present.
    pub fn contains(&self, key: &Value) -> bool {
        self.entries.contains_key(&canonical_key(key))
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &Value) -> Result<Value> {
        let key = canonical_key(key);
        self.entries
            .remove(&key)
            .ok_or(StdlibError::KeyNotFound { key })
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn sorted(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
        entries
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Bukkit {
        self.sorted()
            .into_iter()
            .map(|(k, _)| Value::string(k.as_str()))
            .collect()
    }

    /// Values in ascending key order.
    pub fn values(&self) -> Bukkit {
        self.sorted().into_iter().map(|(_, v)| v.clone()).collect()
    }

    /// `(key, value)` pairs in ascending key order.
    pub fn entries(&self) -> Vec<(String, Value)> {
        self.sorted()
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Copy every entry of `other` into this map; `other` wins on conflict.
    pub fn merge(&mut self, other: &Baskit) {
        for (k, v) in &other.entries {
            self.entries.insert(k.clone(), v.clone());
        }
    }
}

impl FromIterator<(String, Value)> for Baskit {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
