//! An ordered, key-preserving collection.
//!
//! Every operation returns a new [`Collection`] and leaves the receiver
//! alone, except the in-place set: [`push`](Collection::push),
//! [`put`](Collection::put), [`pop`](Collection::pop),
//! [`shift`](Collection::shift), [`forget`](Collection::forget),
//! [`prepend`](Collection::prepend), [`pull`](Collection::pull),
//! [`each`](Collection::each), [`transform`](Collection::transform) and
//! [`tap`](Collection::tap).
//!
//! Operations that take a derived key accept any `Fn(&Value, &Key) -> Value`;
//! [`by`] builds one from a path.

mod group;
mod serialize;
mod sets;
mod sort;
mod stats;

#[cfg(feature = "serde")]
pub(crate) use serialize::serialized;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    Equality, IntoPath, Key, Macros, Map, Result, Value, access::resolve, arr,
};

/// An ordered map of items with a functional API.
///
/// ```rust
/// use datapath::{by, Collection, Value};
///
/// let posts: Collection = serde_json::json!([
///     {"title": "b", "views": 3},
///     {"title": "a", "views": 10},
/// ])
/// .into();
/// let titles = posts.sort_by(by("title")).pluck("title").values();
/// assert_eq!(titles, Collection::from(vec!["a", "b"]));
/// assert_eq!(posts.sum_by(by("views")), 13.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    items: Map,
}

/// A derived-key function that reads `path` from each item.
///
/// Missing paths yield `null`.
pub fn by(path: impl IntoPath) -> impl Fn(&Value, &Key) -> Value {
    let path = path.into_path();
    move |item, _| resolve(item, &path).unwrap_or_default()
}

impl Collection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from any value; see [`arr::items`].
    pub fn make(value: impl Into<Value>) -> Self {
        Self {
            items: arr::into_items(value.into()),
        }
    }

    #[must_use]
    pub fn all(&self) -> &Map {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Map {
        self.items
    }

    pub(crate) fn items_mut(&mut self) -> &mut Map {
        &mut self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.items.get(&key.into())
    }

    #[must_use]
    pub fn has(&self, key: impl Into<Key>) -> bool {
        self.items.contains_key(&key.into())
    }

    /// The keys, as a list.
    #[must_use]
    pub fn keys(&self) -> Collection {
        self.items.keys().map(Value::from).collect()
    }

    /// The values, renumbered from zero.
    #[must_use]
    pub fn values(&self) -> Collection {
        self.items.values().cloned().collect()
    }

    #[must_use]
    pub fn first(&self) -> Option<&Value> {
        self.items.first().map(|(_, v)| v)
    }

    pub fn first_where<F>(&self, predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        arr::first(&self.items, predicate).map(|(_, v)| v)
    }

    #[must_use]
    pub fn last(&self) -> Option<&Value> {
        self.items.last().map(|(_, v)| v)
    }

    pub fn last_where<F>(&self, predicate: F) -> Option<&Value>
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        arr::last(&self.items, predicate).map(|(_, v)| v)
    }

    /// Returns `true` if any item loosely equals `value`.
    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.items.values().any(|v| v.loose_eq(value))
    }

    pub fn contains_where<F>(&self, predicate: F) -> bool
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        arr::first(&self.items, predicate).is_some()
    }

    /// The key of the first item equal to `value`.
    #[must_use]
    pub fn search(&self, value: &Value, equality: Equality) -> Option<&Key> {
        self.items
            .iter()
            .find(|(_, v)| equality.eq(v, value))
            .map(|(k, _)| k)
    }

    // --------------------------------------------------------------------------------------------
    // In-place edits
    // --------------------------------------------------------------------------------------------

    /// Appends under the next free integer key.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        self.items.push(value);
        self
    }

    /// Inserts or overwrites `key`.
    pub fn put(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> &mut Self {
        self.items.insert(key, value);
        self
    }

    pub fn pop(&mut self) -> Option<Value> {
        self.items.pop().map(|(_, v)| v)
    }

    pub fn shift(&mut self) -> Option<Value> {
        self.items.shift().map(|(_, v)| v)
    }

    pub fn forget(&mut self, key: impl Into<Key>) -> &mut Self {
        self.items.remove(&key.into());
        self
    }

    /// Inserts at the front; integer keys are renumbered.
    pub fn prepend(&mut self, value: impl Into<Value>, key: Option<Key>) -> &mut Self {
        self.items.prepend(value, key);
        self
    }

    /// Removes and returns the item at `key`.
    pub fn pull(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.items.remove(&key.into())
    }

    /// Visits items in order until `f` returns `false`.
    pub fn each<F>(&self, mut f: F) -> &Self
    where
        F: FnMut(&Value, &Key) -> bool,
    {
        for (k, v) in &self.items {
            if !f(v, k) {
                break;
            }
        }
        self
    }

    /// Replaces every item with `f(item, key)`.
    pub fn transform<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(&Value, &Key) -> Value,
    {
        for (k, v) in self.items.iter_mut() {
            *v = f(v, k);
        }
        self
    }

    /// Hands the collection to `f` and returns it unchanged.
    pub fn tap<F>(&self, f: F) -> &Self
    where
        F: FnOnce(&Collection),
    {
        f(self);
        self
    }

    // --------------------------------------------------------------------------------------------
    // Transformations
    // --------------------------------------------------------------------------------------------

    #[must_use]
    pub fn map<F>(&self, f: F) -> Collection
    where
        F: Fn(&Value, &Key) -> Value,
    {
        self.items
            .iter()
            .map(|(k, v)| (k.clone(), f(v, k)))
            .collect()
    }

    /// Builds a new collection from the `(key, value)` pairs `f` returns.
    #[must_use]
    pub fn map_with_keys<F>(&self, f: F) -> Collection
    where
        F: Fn(&Value, &Key) -> (Key, Value),
    {
        self.items.iter().map(|(k, v)| f(v, k)).collect()
    }

    /// Keeps items satisfying `predicate`, preserving keys.
    #[must_use]
    pub fn filter<F>(&self, predicate: F) -> Collection
    where
        F: Fn(&Value, &Key) -> bool,
    {
        self.items
            .iter()
            .filter(|(k, v)| predicate(v, k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Keeps truthy items.
    #[must_use]
    pub fn filter_truthy(&self) -> Collection {
        self.filter(|v, _| v.truthy())
    }

    /// Drops `null` items, preserving keys.
    #[must_use]
    pub fn filter_nulls(&self) -> Collection {
        self.reject(|v, _| v.is_null())
    }

    /// Drops items satisfying `predicate`, preserving keys.
    #[must_use]
    pub fn reject<F>(&self, predicate: F) -> Collection
    where
        F: Fn(&Value, &Key) -> bool,
    {
        self.filter(|v, k| !predicate(v, k))
    }

    pub fn reduce<T, F>(&self, init: T, f: F) -> T
    where
        F: FnMut(T, &Value, &Key) -> T,
    {
        let mut f = f;
        self.items.iter().fold(init, |acc, (k, v)| f(acc, v, k))
    }

    pub fn every<F>(&self, predicate: F) -> bool
    where
        F: Fn(&Value, &Key) -> bool,
    {
        self.items.iter().all(|(k, v)| predicate(v, k))
    }

    #[must_use]
    pub fn only<K, I>(&self, keys: I) -> Collection
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        arr::only(&self.items, keys).into()
    }

    #[must_use]
    pub fn except<K, I>(&self, keys: I) -> Collection
    where
        K: Into<Key>,
        I: IntoIterator<Item = K>,
    {
        arr::except(&self.items, keys).into()
    }

    /// Items from position `offset`, at most `length` of them. Keys are kept.
    #[must_use]
    pub fn slice(&self, offset: usize, length: Option<usize>) -> Collection {
        self.items
            .iter()
            .skip(offset)
            .take(length.unwrap_or(usize::MAX))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// The first `n` items, or the last `-n` when `n` is negative.
    #[must_use]
    pub fn take(&self, n: isize) -> Collection {
        let len = self.len();
        let count = n.unsigned_abs().min(len);
        if n < 0 {
            self.slice(len - count, None)
        } else {
            self.slice(0, Some(count))
        }
    }

    #[must_use]
    pub fn skip(&self, n: usize) -> Collection {
        self.slice(n, None)
    }

    /// The `page`-th window of `per_page` items, counting pages from 1.
    #[must_use]
    pub fn for_page(&self, page: usize, per_page: usize) -> Collection {
        let offset = page.saturating_sub(1).saturating_mul(per_page);
        self.slice(offset, Some(per_page))
    }

    /// Items in reverse order, keys kept.
    #[must_use]
    pub fn reverse(&self) -> Collection {
        self.items
            .iter()
            .rev()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Swaps keys and values.
    #[must_use]
    pub fn flip(&self) -> Collection {
        self.items
            .iter()
            .map(|(k, v)| (v.to_key(), Value::from(k)))
            .collect()
    }

    /// Joins the items' text with `glue`. Strings are used verbatim; other
    /// values are rendered as JSON.
    #[must_use]
    pub fn implode(&self, glue: &str) -> String {
        self.items
            .values()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(glue)
    }

    #[must_use]
    pub fn flatten(&self, depth: Option<usize>) -> Collection {
        arr::flatten(&self.items, depth).into()
    }

    #[must_use]
    pub fn collapse(&self) -> Collection {
        arr::collapse(self.items.values()).into()
    }

    /// Nested associative items flattened to dotted keys.
    #[must_use]
    pub fn dot(&self) -> Collection {
        arr::dot(&self.items, "").into()
    }

    pub fn pluck(&self, path: impl IntoPath) -> Collection {
        arr::pluck(&self.items, path).into()
    }

    pub fn pluck_keyed(&self, value: impl IntoPath, key: impl IntoPath) -> Collection {
        arr::pluck_keyed(&self.items, value, key).into()
    }

    /// `count` items sampled without replacement.
    ///
    /// # Errors
    ///
    /// [`Error::NotEnoughItems`](crate::Error::NotEnoughItems) if `count`
    /// exceeds [`len`](Self::len).
    pub fn random(&self, count: usize) -> Result<Collection> {
        arr::random(&self.items, count, &mut rand::rng()).map(Into::into)
    }

    /// [`random`](Self::random) driven by a seeded generator.
    ///
    /// # Errors
    ///
    /// As [`random`](Self::random).
    pub fn random_seeded(&self, count: usize, seed: u64) -> Result<Collection> {
        arr::random(&self.items, count, &mut StdRng::seed_from_u64(seed)).map(Into::into)
    }

    /// One randomly chosen item.
    ///
    /// # Errors
    ///
    /// [`Error::NotEnoughItems`](crate::Error::NotEnoughItems) when empty.
    pub fn random_one(&self) -> Result<Value> {
        let picked = arr::random(&self.items, 1, &mut rand::rng())?;
        Ok(picked.into_iter().next().map(|(_, v)| v).unwrap_or_default())
    }

    /// The values in random order; a given `seed` always gives the same
    /// order.
    #[must_use]
    pub fn shuffle(&self, seed: Option<u64>) -> Collection {
        arr::shuffle(&self.items, seed).into()
    }

    /// Runs the extension registered as `name`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownMacro`](crate::Error::UnknownMacro) if nothing is
    /// registered under `name`.
    pub fn call(&self, macros: &Macros, name: &str, args: &[Value]) -> Result<Value> {
        macros.call(name, self, args)
    }
}

impl From<Map> for Collection {
    fn from(items: Map) -> Self {
        Self { items }
    }
}

impl From<Value> for Collection {
    fn from(value: Value) -> Self {
        Self::make(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Collection {
    fn from(values: Vec<T>) -> Self {
        Map::list(values).into()
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Value> for Collection {
    fn from(value: serde_json::Value) -> Self {
        Self::make(Value::from(value))
    }
}

impl FromIterator<Value> for Collection {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Map::from_iter(iter).into()
    }
}

impl FromIterator<(Key, Value)> for Collection {
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        Map::from_iter(iter).into()
    }
}

impl IntoIterator for Collection {
    type Item = (Key, Value);
    type IntoIter = indexmap::map::IntoIter<Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = (&'a Key, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Key, Value>;

    fn into_iter(self) -> Self::IntoIter {
        (&self.items).into_iter()
    }
}
