//! Utility functions and traits for [`ChainedHashMap`]

use crate::chained_map::{ChainedHashMap, TableKey};
use std::borrow::Borrow;

/// Extension trait for map implementations that provides additional utility methods
pub trait MapExtensions<K, V> {
    /// Returns the keys of the map as a Vec
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the map as a Vec
    fn values(&self) -> Vec<V>;

    /// Returns true if the map contains the given key
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized;
}

impl<K, V> MapExtensions<K, V> for ChainedHashMap<K, V>
where
    K: TableKey + Clone,
    V: Clone,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: TableKey + ?Sized,
    {
        self.get(key).is_some()
    }
}

/// Creates a [`ChainedHashMap`] from an iterator of key-value pairs
pub fn from_iter<K, V, I>(iter: I) -> ChainedHashMap<K, V>
where
    K: TableKey,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = ChainedHashMap::new();

    for (key, value) in iter {
        map.insert(key, value);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iter() {
        let data = vec![(1_i64, 1), (2, 2), (3, 3)];

        let map = from_iter(data);

        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.get(&2), Some(&2));
        assert_eq!(map.get(&3), Some(&3));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_keys_and_values() {
        let mut map = ChainedHashMap::new();
        map.insert(1_i64, 10);
        map.insert(2, 20);
        map.insert(3, 30);

        let mut keys = map.keys();
        keys.sort_unstable();

        let mut values = map.values();
        values.sort_unstable();

        assert_eq!(keys, vec![1, 2, 3]);
        assert_eq!(values, vec![10, 20, 30]);
    }

    #[test]
    fn test_contains_key() {
        let mut map = ChainedHashMap::new();
        map.insert("a".to_string(), 1);

        assert!(map.contains_key("a"));
        assert!(!map.contains_key("b"));
    }
}
