use super::Collection;
use crate::{Key, Map, Value};

impl Collection {
    /// Groups items under the key(s) `f` returns.
    ///
    /// When `f` returns an array, the item is placed in every group named by
    /// the array's values. Inside each group items are renumbered from zero;
    /// see [`group_by_with_keys`](Self::group_by_with_keys) to keep them.
    ///
    /// ```rust
    /// use datapath::{by, Collection, Value};
    ///
    /// let posts: Collection = serde_json::json!([{"id": 1, "tags": ["x", "y"]}]).into();
    /// let grouped = posts.group_by(by("tags"));
    /// assert!(grouped.has("x") && grouped.has("y"));
    /// ```
    #[must_use]
    pub fn group_by<F>(&self, f: F) -> Collection
    where
        F: Fn(&Value, &Key) -> Value,
    {
        self.group(f, false)
    }

    /// [`group_by`](Self::group_by), keeping each item's original key.
    #[must_use]
    pub fn group_by_with_keys<F>(&self, f: F) -> Collection
    where
        F: Fn(&Value, &Key) -> Value,
    {
        self.group(f, true)
    }

    fn group<F>(&self, f: F, preserve_keys: bool) -> Collection
    where
        F: Fn(&Value, &Key) -> Value,
    {
        let mut groups = Map::new();
        for (key, value) in &self.items {
            for group_key in group_keys(&f(value, key)) {
                if !groups.contains_key(&group_key) {
                    groups.insert(group_key.clone(), Collection::new());
                }
                let Some(Value::Collection(slot)) = groups.get_mut(&group_key) else {
                    continue;
                };
                if preserve_keys {
                    slot.put(key.clone(), value.clone());
                } else {
                    slot.push(value.clone());
                }
            }
        }
        groups.into()
    }

    /// Re-keys items by `f`. Later items win on collisions.
    #[must_use]
    pub fn key_by<F>(&self, f: F) -> Collection
    where
        F: Fn(&Value, &Key) -> Value,
    {
        self.items
            .iter()
            .map(|(k, v)| (f(v, k).to_key(), v.clone()))
            .collect()
    }

    /// Number of items per derived key, in first-seen order.
    #[must_use]
    pub fn count_by<F>(&self, f: F) -> Collection
    where
        F: Fn(&Value, &Key) -> Value,
    {
        let mut counts = Map::new();
        for (k, v) in &self.items {
            let key = f(v, k).to_key();
            let n = counts.get(&key).and_then(Value::as_f64).unwrap_or(0.0);
            counts.insert(key, n + 1.0);
        }
        counts.into()
    }

    /// Splits into `(passing, failing)`, keys kept.
    #[must_use]
    pub fn partition<F>(&self, predicate: F) -> (Collection, Collection)
    where
        F: Fn(&Value, &Key) -> bool,
    {
        let mut passing = Collection::new();
        let mut failing = Collection::new();
        for (k, v) in &self.items {
            let side = if predicate(v, k) { &mut passing } else { &mut failing };
            side.put(k.clone(), v.clone());
        }
        (passing, failing)
    }

    /// Splits into collections of at most `size` items. Original keys are
    /// kept inside each chunk. A zero size yields an empty collection.
    #[must_use]
    pub fn chunk(&self, size: usize) -> Collection {
        if size == 0 {
            return Collection::new();
        }
        let mut chunks = Collection::new();
        let mut current = Collection::new();
        for (k, v) in &self.items {
            current.put(k.clone(), v.clone());
            if current.len() == size {
                chunks.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            chunks.push(current);
        }
        chunks
    }
}

fn group_keys(derived: &Value) -> Vec<Key> {
    match derived {
        Value::Array(keys) => keys.values().map(Value::to_key).collect(),
        Value::Collection(keys) => keys.all().values().map(Value::to_key).collect(),
        single => vec![single.to_key()],
    }
}
