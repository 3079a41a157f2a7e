use core::cmp::Ordering;

use super::Collection;
use crate::{Key, Value};

impl Collection {
    /// Items in ascending order of [`Value::compare`], keys kept.
    #[must_use]
    pub fn sort(&self) -> Collection {
        self.sort_with(Value::compare)
    }

    #[must_use]
    pub fn sort_desc(&self) -> Collection {
        self.sort_with(|a, b| b.compare(a))
    }

    /// Stable sort with a custom comparator.
    #[must_use]
    pub fn sort_with<F>(&self, mut compare: F) -> Collection
    where
        F: FnMut(&Value, &Value) -> Ordering,
    {
        let mut entries: Vec<(&Key, &Value)> = self.items.iter().collect();
        entries.sort_by(|(_, a), (_, b)| compare(*a, *b));
        entries
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Stable sort by a derived key, ascending. Keys are kept.
    ///
    /// Each item's sort key is computed once.
    #[must_use]
    pub fn sort_by<F>(&self, key: F) -> Collection
    where
        F: Fn(&Value, &Key) -> Value,
    {
        self.sort_by_derived(key, false)
    }

    /// [`sort_by`](Self::sort_by), descending. Ties keep their original
    /// order.
    #[must_use]
    pub fn sort_by_desc<F>(&self, key: F) -> Collection
    where
        F: Fn(&Value, &Key) -> Value,
    {
        self.sort_by_derived(key, true)
    }

    fn sort_by_derived<F>(&self, key: F, descending: bool) -> Collection
    where
        F: Fn(&Value, &Key) -> Value,
    {
        let mut decorated: Vec<(Value, &Key, &Value)> =
            self.items.iter().map(|(k, v)| (key(v, k), k, v)).collect();
        decorated.sort_by(|(a, ..), (b, ..)| {
            let order = a.compare(b);
            if descending { order.reverse() } else { order }
        });
        decorated
            .into_iter()
            .map(|(_, k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Items ordered by key.
    #[must_use]
    pub fn sort_keys(&self) -> Collection {
        let mut entries: Vec<(&Key, &Value)> = self.items.iter().collect();
        entries.sort_by(|(a, _), (b, _)| Value::from(*a).compare(&Value::from(*b)));
        entries
            .into_iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    #[must_use]
    pub fn sort_keys_desc(&self) -> Collection {
        self.sort_keys().reverse()
    }
}
