//! Ordered sequences addressable by position and by key.
//!
//! `KeyIndex` is a unique, ordered key set with O(1) position lookup. One
//! index is built per table and shared by reference across all of its rows,
//! so symbolic access never costs a scan. `MappedSequence` pairs a key
//! index with values; iteration yields values in insertion order.

use crate::error::{Error, Result};
use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;
use hashbrown::HashMap;

/// An ordered set of unique keys with O(1) position lookup.
#[derive(Clone, Debug)]
pub struct KeyIndex<K> {
    keys: Vec<K>,
    positions: HashMap<K, usize>,
}

impl<K> KeyIndex<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Builds an index over the given keys. Duplicates are an error.
    pub fn new(keys: Vec<K>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(keys.len());

        for (i, key) in keys.iter().enumerate() {
            if positions.insert(key.clone(), i).is_some() {
                return Err(Error::invalid_operation(format!(
                    "duplicate key {:?}",
                    key
                )));
            }
        }

        Ok(Self { keys, positions })
    }

    /// Returns the position of a key, if present.
    #[inline]
    pub fn position(&self, key: &K) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Returns the keys in insertion order.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Returns the number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if the index holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns true if the key is present.
    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }
}

/// An immutable sequence addressable both by integer position and, when
/// keys are present, by unique key.
#[derive(Clone, Debug)]
pub struct MappedSequence<K, V> {
    values: Vec<V>,
    keys: Option<Arc<KeyIndex<K>>>,
}

impl<K, V> MappedSequence<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Creates a sequence with positional access only.
    pub fn new(values: Vec<V>) -> Self {
        Self { values, keys: None }
    }

    /// Creates a sequence with both positional and keyed access.
    /// The key index must match the value count.
    pub fn with_keys(values: Vec<V>, keys: Arc<KeyIndex<K>>) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(Error::invalid_operation(format!(
                "{} keys for {} values",
                keys.len(),
                values.len()
            )));
        }

        Ok(Self {
            values,
            keys: Some(keys),
        })
    }

    /// Returns the value at the given position.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.values.get(index)
    }

    /// Returns the value stored under the given key.
    pub fn get_by_key(&self, key: &K) -> Option<&V> {
        let index = self.keys.as_ref()?.position(key)?;
        self.values.get(index)
    }

    /// Returns the keys in insertion order, if this sequence has keys.
    pub fn keys(&self) -> Option<&[K]> {
        self.keys.as_ref().map(|k| k.keys())
    }

    /// Returns the shared key index, if this sequence has keys.
    pub fn key_index(&self) -> Option<&Arc<KeyIndex<K>>> {
        self.keys.as_ref()
    }

    /// Returns the values in insertion order.
    #[inline]
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Iterates over values in insertion order.
    pub fn iter(&self) -> core::slice::Iter<'_, V> {
        self.values.iter()
    }

    /// Returns the number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a, K, V> IntoIterator for &'a MappedSequence<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    type Item = &'a V;
    type IntoIter = core::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
