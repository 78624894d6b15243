//! Ordered name/value mapping
//!
//! Entries keep the order they were inserted in, since that order is
//! reproduced when the file is written back.

use std::collections::HashMap;

/// An ordered sequence of unique `(name, value)` pairs
#[derive(Debug, Clone, Default)]
pub struct EnvMap {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl EnvMap {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value
    ///
    /// An existing name keeps its position and gets the new value; the old
    /// value is returned. A new name is appended.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();

        match self.index.get(&name) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, value)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Look up a value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.index
            .get(name)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterate names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl PartialEq for EnvMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for EnvMap {}

impl<K, V> FromIterator<(K, V)> for EnvMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = EnvMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_preserves_order() {
        let map: EnvMap = [("B", "2"), ("A", "1"), ("C", "3")].into_iter().collect();
        let names: Vec<_> = map.names().collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_insert_existing_keeps_position() {
        let mut map: EnvMap = [("A", "1"), ("B", "2")].into_iter().collect();
        let old = map.insert("A", "changed");

        assert_eq!(old.as_deref(), Some("1"));
        assert_eq!(map.len(), 2);
        assert_eq!(map.iter().next(), Some(("A", "changed")));
    }

    #[test]
    fn test_get() {
        let map: EnvMap = [("DB_HOST", "localhost")].into_iter().collect();
        assert_eq!(map.get("DB_HOST"), Some("localhost"));
        assert_eq!(map.get("DB_PORT"), None);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a: EnvMap = [("A", "1"), ("B", "2")].into_iter().collect();
        let b: EnvMap = [("B", "2"), ("A", "1")].into_iter().collect();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
