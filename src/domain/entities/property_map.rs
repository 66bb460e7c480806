//! Device property map
//!
//! String-keyed, string-valued properties as reported by the device
//! property store. Values are kept as raw strings; the accessors
//! interpret them on read.

use std::collections::HashMap;

/// Properties of a single device, keyed by property name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: HashMap<String, String>,
}

impl PropertyMap {
    /// Creates an empty property map
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a property, replacing any previous value under the same name
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    /// Returns the raw value of a property
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns true if the property is present, whatever its value
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns `Some(true)` if the property holds exactly the `"0"` sentinel,
    /// `Some(false)` for any other value and `None` if absent.
    pub fn is_zero(&self, name: &str) -> Option<bool> {
        self.get(name).map(|value| value == "0")
    }

    /// Splits a whitespace-separated property into its items
    pub fn list(&self, name: &str) -> Vec<String> {
        self.get(name)
            .map(|value| value.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for PropertyMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
