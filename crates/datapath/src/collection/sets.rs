use super::Collection;
use crate::{Equality, Key, Value, arr};

impl Collection {
    /// Drops items loosely equal to an earlier one. Keys are kept.
    #[must_use]
    pub fn unique(&self) -> Collection {
        self.unique_by(|v, _| v.clone(), Equality::Loose)
    }

    /// Drops items whose derived key equals that of an earlier item.
    ///
    /// The first occurrence always wins.
    #[must_use]
    pub fn unique_by<F>(&self, f: F, equality: Equality) -> Collection
    where
        F: Fn(&Value, &Key) -> Value,
    {
        let mut seen: Vec<Value> = Vec::new();
        self.items
            .iter()
            .filter(|(k, v)| {
                let id = f(v, k);
                if seen.iter().any(|s| equality.eq(s, &id)) {
                    false
                } else {
                    seen.push(id);
                    true
                }
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Items whose value appears nowhere in `other`. Keys are ignored for
    /// matching and kept in the result.
    #[must_use]
    pub fn diff(&self, other: impl Into<Collection>) -> Collection {
        let other = other.into();
        self.filter(|v, _| !other.contains(v))
    }

    /// Items whose key is absent from `other`.
    #[must_use]
    pub fn diff_keys(&self, other: impl Into<Collection>) -> Collection {
        let other = other.into();
        self.filter(|_, k| !other.items.contains_key(k))
    }

    /// Items whose value also appears in `other`.
    #[must_use]
    pub fn intersect(&self, other: impl Into<Collection>) -> Collection {
        let other = other.into();
        self.filter(|v, _| other.contains(v))
    }

    /// Items whose key is also present in `other`.
    #[must_use]
    pub fn intersect_by_keys(&self, other: impl Into<Collection>) -> Collection {
        let other = other.into();
        self.filter(|_, k| other.items.contains_key(k))
    }

    /// Shallow union; on key collisions the receiver's item wins.
    #[must_use]
    pub fn union(&self, other: impl Into<Collection>) -> Collection {
        arr::union(&self.items, &other.into().items).into()
    }

    /// Recursive merge; named keys of `other` win, integer keys are appended.
    /// See [`arr::merge`].
    #[must_use]
    pub fn merge(&self, other: impl Into<Collection>) -> Collection {
        arr::merge(&self.items, &other.into().items).into()
    }
}
