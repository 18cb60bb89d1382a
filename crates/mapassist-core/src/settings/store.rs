//! Flat key/value settings stores.
//!
//! The configuration reader never reaches for ambient global state; it is
//! handed a [`SettingsStore`] instead.  Production code fills a
//! [`MemorySettings`] from the settings file, tests build one from a literal
//! list of pairs.

use std::collections::HashMap;

/// Read-only access to a flat, string-keyed settings table.
///
/// Keys are case-sensitive.  `None` means the key is not present at all; an
/// empty string is a present-but-empty value.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStore {
    /// Returns the raw value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;
}

/// `HashMap`-backed [`SettingsStore`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySettings {
    values: HashMap<String, String>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a setting.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Removes a setting, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<K, V> FromIterator<(K, V)> for MemorySettings
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for MemorySettings
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}
