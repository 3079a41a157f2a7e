//! The insertion-ordered key/value store behind arrays and collections.
//!
//! A [`Map`] plays the role of both a list and a dictionary. It is
//! *sequential* when its keys are exactly `0..len` in order and *associative*
//! otherwise; several algorithms (`dot`, `merge`) branch on that distinction.

use indexmap::IndexMap;

use crate::{Key, Value};

/// An ordered map from [`Key`]s to [`Value`]s.
///
/// Iteration follows insertion order; overwriting an existing key keeps its
/// position. Equality is order-sensitive.
///
/// ```rust
/// use datapath::{Key, Map, Value};
///
/// let mut map = Map::new();
/// map.push("a");
/// map.push("b");
/// assert!(map.is_sequential());
///
/// map.insert("name", "c");
/// assert!(!map.is_sequential());
/// map.push("d");
/// assert_eq!(map.get(&Key::Index(2)), Some(&Value::from("d")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: IndexMap<Key, Value>,
    next_index: usize,
}

impl Map {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            next_index: 0,
        }
    }

    /// Builds a sequential map from values.
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        values.into_iter().map(Into::into).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &Key) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if let Key::Index(i) = key {
            self.next_index = self.next_index.max(i.saturating_add(1));
        }
        self.entries.insert(key, value.into())
    }

    /// Appends `value` under the next free integer key and returns that key.
    pub fn push(&mut self, value: impl Into<Value>) -> Key {
        let key = Key::Index(self.next_index);
        self.insert(key.clone(), value);
        key
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Removes and returns the last entry.
    pub fn pop(&mut self) -> Option<(Key, Value)> {
        let popped = self.entries.pop();
        self.recount();
        popped
    }

    /// Removes and returns the first entry.
    pub fn shift(&mut self) -> Option<(Key, Value)> {
        let shifted = self.entries.shift_remove_index(0);
        self.recount();
        shifted
    }

    /// Inserts at the front. Integer keys are renumbered from zero.
    pub fn prepend(&mut self, value: impl Into<Value>, key: Option<Key>) {
        let mut out = Map::with_capacity(self.len() + 1);
        match key {
            Some(key) => {
                out.insert(key, value);
            }
            None => {
                out.push(value);
            }
        }
        for (k, v) in std::mem::take(&mut self.entries) {
            match k {
                Key::Index(_) => {
                    out.push(v);
                }
                name @ Key::Name(_) => {
                    out.insert(name, v);
                }
            }
        }
        *self = out;
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Key, &Value)> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Key, &mut Value)> {
        self.entries.iter_mut()
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &Key> + ExactSizeIterator {
        self.entries.keys()
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &Value> + ExactSizeIterator {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut Value> {
        self.entries.values_mut()
    }

    #[must_use]
    /// The entry at `position` in iteration order.
    pub fn get_index(&self, position: usize) -> Option<(&Key, &Value)> {
        self.entries.get_index(position)
    }

    #[must_use]
    pub fn first(&self) -> Option<(&Key, &Value)> {
        self.entries.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<(&Key, &Value)> {
        self.entries.last()
    }

    /// Returns `true` if the keys are exactly `0..len` in order.
    #[must_use]
    pub fn is_sequential(&self) -> bool {
        self.entries
            .keys()
            .enumerate()
            .all(|(i, k)| *k == Key::Index(i))
    }

    /// Returns `true` if the map is not sequential.
    #[must_use]
    pub fn is_associative(&self) -> bool {
        !self.is_sequential()
    }

    /// Consumes the map and renumbers its values from zero.
    #[must_use]
    pub fn into_list(self) -> Map {
        self.entries.into_values().collect()
    }

    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&Key, &Value) -> bool,
    {
        self.entries.retain(|k, v| keep(k, v));
        self.recount();
    }

    fn recount(&mut self) {
        self.next_index = self
            .entries
            .keys()
            .filter_map(Key::as_index)
            .max()
            .map_or(0, |i| i.saturating_add(1));
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl FromIterator<Value> for Map {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Map::with_capacity(iter.size_hint().0);
        for value in iter {
            map.push(value);
        }
        map
    }
}

impl FromIterator<(Key, Value)> for Map {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Map::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<K: Into<Key>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Map {
    fn from(entries: [(K, V); N]) -> Self {
        entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }
}

impl IntoIterator for Map {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Extend<(Key, Value)> for Map {
    fn extend<I: IntoIterator<Item = (Key, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
