//! Stateless algorithms over [`Map`]s.
//!
//! These are the building blocks of [`Collection`](crate::Collection); they
//! never mutate their inputs.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::{
    Error, IntoPath, Key, Map, Path, Result, Segment, Value, access::resolve, mutate::set,
};

/// Normalizes any value into a map of items.
///
/// Arrays and collections yield their entries, records their plain-array
/// form (or their fields), `null` nothing, and any other scalar a
/// one-element list.
#[must_use]
pub fn items(value: &Value) -> Map {
    match value {
        Value::Null => Map::new(),
        Value::Array(map) => map.clone(),
        Value::Collection(c) => c.all().clone(),
        Value::Object(record) => record.to_array().unwrap_or_else(|| record.fields()),
        scalar => Map::list([scalar.clone()]),
    }
}

/// Owned variant of [`items`].
#[must_use]
pub fn into_items(value: Value) -> Map {
    match value {
        Value::Array(map) => map,
        Value::Collection(c) => c.into_items(),
        other => items(&other),
    }
}

/// Like [`items`], except that records are wrapped whole instead of being
/// opened up.
#[must_use]
pub fn wrap(value: &Value) -> Map {
    match value {
        Value::Null => Map::new(),
        Value::Array(map) => map.clone(),
        Value::Collection(c) => c.all().clone(),
        other => Map::list([other.clone()]),
    }
}

/// Returns `true` if `value` is an array whose keys are not `0..len`.
#[must_use]
pub fn is_assoc(value: &Value) -> bool {
    matches!(value, Value::Array(map) if map.is_associative())
}

/// Returns `true` if `value` is an array whose keys are exactly `0..len`.
#[must_use]
pub fn is_list(value: &Value) -> bool {
    matches!(value, Value::Array(map) if map.is_sequential())
}

/// Flattens nested associative arrays into dotted keys.
///
/// Sequential arrays are leaves, even when they hold maps.
///
/// ```rust
/// use datapath::{arr, Value};
///
/// let nested: Value = serde_json::json!({"a": {"b": 1}, "c": [1, 2, 3]}).into();
/// let flat = arr::dot(nested.as_map().unwrap(), "");
/// assert_eq!(Value::Array(flat).to_string(), r#"{"a.b":1,"c":[1,2,3]}"#);
/// ```
#[must_use]
pub fn dot(map: &Map, prefix: &str) -> Map {
    let mut out = Map::new();
    dot_into(map, prefix, &mut out);
    out
}

fn dot_into(map: &Map, prefix: &str, out: &mut Map) {
    for (key, value) in map {
        let name = format!("{prefix}{key}");
        match value {
            Value::Array(inner) if inner.is_associative() => {
                dot_into(inner, &format!("{name}."), out);
            }
            leaf => {
                out.insert(Key::new(&name), leaf.clone());
            }
        }
    }
}

/// Rebuilds nesting from dotted keys; the inverse of [`dot`] for
/// associative input.
#[must_use]
pub fn undot(map: &Map) -> Value {
    let mut root = Value::empty_map();
    for (key, value) in map {
        let path: Path = key
            .to_string()
            .split('.')
            .map(|part| Segment::Key(Key::new(part)))
            .collect();
        set(&mut root, path, value.clone());
    }
    root
}

/// Concatenates the entries of every array or collection in `values` into
/// one list. Other values are skipped.
pub fn collapse<'a, I>(values: I) -> Map
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut out = Map::new();
    for value in values {
        if let Some(inner) = value.as_map() {
            for v in inner.values() {
                out.push(v.clone());
            }
        }
    }
    out
}

/// Flattens nested arrays and collections into one list.
///
/// `depth` bounds how many levels are opened; `None` flattens completely and
/// `Some(1)` is a single [`collapse`]-like pass.
#[must_use]
pub fn flatten(map: &Map, depth: Option<usize>) -> Map {
    let mut out = Map::new();
    flatten_into(map, depth, &mut out);
    out
}

fn flatten_into(map: &Map, depth: Option<usize>, out: &mut Map) {
    for value in map.values() {
        match (value.as_map(), depth) {
            (None, _) | (Some(_), Some(0)) => {
                out.push(value.clone());
            }
            (Some(inner), Some(1)) => {
                for v in inner.values() {
                    out.push(v.clone());
                }
            }
            (Some(inner), _) => flatten_into(inner, depth.map(|d| d - 1), out),
        }
    }
}

/// Recursively merges `b` into `a`.
///
/// Named keys of `b` overwrite those of `a`, except that two containers under
/// the same name merge recursively. Integer-keyed entries of `b` are appended
/// after `a`'s, so two lists concatenate. A scalar merged with a list joins
/// it. An empty side leaves the other unchanged.
///
/// ```rust
/// use datapath::{arr, Map};
///
/// let a = Map::from([("a", 1)]);
/// let b = Map::from([("a", 2)]);
/// assert_eq!(arr::merge(&a, &b), b);
/// assert_eq!(arr::union(&a, &b), a);
/// ```
#[must_use]
pub fn merge(a: &Map, b: &Map) -> Map {
    let mut out = a.clone();
    for (key, incoming) in b {
        match key {
            Key::Index(_) => {
                out.push(incoming.clone());
            }
            Key::Name(_) => {
                let merged = match out.get(key) {
                    Some(existing) => merge_values(existing, incoming),
                    None => incoming.clone(),
                };
                out.insert(key.clone(), merged);
            }
        }
    }
    out
}

fn merge_values(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => Value::Array(merge(x, y)),
        _ if is_list(a) || is_list(b) => Value::Array(merge(&wrap(a), &wrap(b))),
        _ => b.clone(),
    }
}

/// Shallow union: keys already in `a` keep `a`'s value.
#[must_use]
pub fn union(a: &Map, b: &Map) -> Map {
    let mut out = a.clone();
    for (key, value) in b {
        if !out.contains_key(key) {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}

/// Extracts `path` from every member into a list. Misses become `null`.
pub fn pluck(map: &Map, path: impl IntoPath) -> Map {
    let path = path.into_path();
    map.values()
        .map(|item| resolve(item, &path).unwrap_or_default())
        .collect()
}

/// Extracts `value` from every member, keyed by the member's `key`.
///
/// Later members overwrite earlier ones that resolve to the same key.
pub fn pluck_keyed(map: &Map, value: impl IntoPath, key: impl IntoPath) -> Map {
    let value = value.into_path();
    let key = key.into_path();
    let mut out = Map::with_capacity(map.len());
    for item in map.values() {
        let k = resolve(item, &key).unwrap_or_default().to_key();
        out.insert(k, resolve(item, &value).unwrap_or_default());
    }
    out
}

/// Entries whose key is in `keys`, in the map's order.
pub fn only<K, I>(map: &Map, keys: I) -> Map
where
    K: Into<Key>,
    I: IntoIterator<Item = K>,
{
    let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
    map.iter()
        .filter(|(k, _)| keys.contains(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Entries whose key is not in `keys`.
pub fn except<K, I>(map: &Map, keys: I) -> Map
where
    K: Into<Key>,
    I: IntoIterator<Item = K>,
{
    let keys: Vec<Key> = keys.into_iter().map(Into::into).collect();
    map.iter()
        .filter(|(k, _)| !keys.contains(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// The first entry satisfying `predicate`.
pub fn first<F>(map: &Map, mut predicate: F) -> Option<(&Key, &Value)>
where
    F: FnMut(&Value, &Key) -> bool,
{
    map.iter().find(|(k, v)| predicate(v, k))
}

/// The last entry satisfying `predicate`.
pub fn last<F>(map: &Map, mut predicate: F) -> Option<(&Key, &Value)>
where
    F: FnMut(&Value, &Key) -> bool,
{
    map.iter().rev().find(|(k, v)| predicate(v, k))
}

/// Picks `count` distinct values without replacement, in their original
/// order.
///
/// # Errors
///
/// [`Error::NotEnoughItems`] if `count` exceeds the number of entries.
pub fn random<R>(map: &Map, count: usize, rng: &mut R) -> Result<Map>
where
    R: Rng + ?Sized,
{
    if count > map.len() {
        return Err(Error::NotEnoughItems {
            requested: count,
            available: map.len(),
        });
    }
    let mut picked = rand::seq::index::sample(rng, map.len(), count).into_vec();
    picked.sort_unstable();
    Ok(picked
        .into_iter()
        .filter_map(|i| map.get_index(i))
        .map(|(_, v)| v.clone())
        .collect())
}

/// The values in random order, renumbered from zero.
///
/// The same `seed` always produces the same order.
#[must_use]
pub fn shuffle(map: &Map, seed: Option<u64>) -> Map {
    let mut values: Vec<Value> = map.values().cloned().collect();
    match seed {
        Some(seed) => values.shuffle(&mut StdRng::seed_from_u64(seed)),
        None => values.shuffle(&mut rand::rng()),
    }
    values.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn map(json: serde_json::Value) -> Map {
        into_items(json.into())
    }

    #[rstest]
    #[case(json!({"a": {"b": 1}}), json!({"a.b": 1}))]
    #[case(json!({"a": [1, 2, 3]}), json!({"a": [1, 2, 3]}))]
    #[case(json!({"a": [{"b": 1}]}), json!({"a": [{"b": 1}]}))]
    #[case(json!({"a": {}, "b": {"c": {"d": null}}}), json!({"a": [], "b.c.d": null}))]
    #[case(json!({"a": {"1": "x", "2": "y"}}), json!({"a.1": "x", "a.2": "y"}))]
    fn dot_stops_at_lists(#[case] input: serde_json::Value, #[case] expected: serde_json::Value) {
        assert_eq!(dot(&map(input), ""), map(expected));
    }

    #[test]
    fn dot_with_prefix_and_undot() {
        let nested = map(json!({"a": {"b": 1, "c": {"d": 2}}}));
        let flat = dot(&nested, "root.");
        assert_eq!(flat, map(json!({"root.a.b": 1, "root.a.c.d": 2})));
        assert_eq!(undot(&dot(&nested, "")), Value::Array(nested));
    }

    #[test]
    fn collapse_concatenates_containers() {
        let values = [
            Value::list([1, 2]),
            Value::from(3),
            Value::Collection(crate::Collection::from(vec![Value::from(4)])),
        ];
        assert_eq!(collapse(&values), Map::list([1, 2, 4]));
    }

    #[rstest]
    #[case(None, json!(["a", "b", "c", "d"]))]
    #[case(Some(1), json!(["a", "b", ["c", ["d"]]]))]
    #[case(Some(2), json!(["a", "b", "c", ["d"]]))]
    fn flatten_respects_depth(#[case] depth: Option<usize>, #[case] expected: serde_json::Value) {
        let input = map(json!(["a", ["b", ["c", ["d"]]]]));
        assert_eq!(flatten(&input, depth), map(expected));
    }

    #[test]
    fn merge_recurses_and_concatenates() {
        let a = map(json!({"a": 1, "n": {"x": 1, "y": 1}, "l": [1, 2]}));
        let b = map(json!({"a": 2, "n": {"y": 2, "z": 2}, "l": [3], "new": true}));
        assert_eq!(
            merge(&a, &b),
            map(json!({"a": 2, "n": {"x": 1, "y": 2, "z": 2}, "l": [1, 2, 3], "new": true}))
        );
    }

    #[test]
    fn merge_vs_union_precedence() {
        let a = map(json!({"a": 1}));
        let b = map(json!({"a": 2, "b": 3}));
        assert_eq!(merge(&a, &b), map(json!({"a": 2, "b": 3})));
        assert_eq!(union(&a, &b), map(json!({"a": 1, "b": 3})));
    }

    #[rstest]
    #[case(json!({"cfg": {"host": "h", "port": 1}}), json!({"cfg": {}}), json!({"cfg": {"host": "h", "port": 1}}))]
    #[case(json!({"cfg": {}}), json!({"cfg": {"host": "h"}}), json!({"cfg": {"host": "h"}}))]
    #[case(json!({"cfg": {"host": "h"}}), json!({"cfg": ["x"]}), json!({"cfg": {"host": "h", "0": "x"}}))]
    #[case(json!({"cfg": ["x"]}), json!({"cfg": {"host": "h"}}), json!({"cfg": {"0": "x", "host": "h"}}))]
    #[case(json!({"l": [1]}), json!({"l": 2}), json!({"l": [1, 2]}))]
    #[case(json!({"s": 1}), json!({"s": []}), json!({"s": [1]}))]
    fn merge_keeps_named_keys_beside_lists(
        #[case] a: serde_json::Value,
        #[case] b: serde_json::Value,
        #[case] expected: serde_json::Value,
    ) {
        assert_eq!(merge(&map(a), &map(b)), map(expected));
    }

    #[test]
    fn merge_appends_integer_keys_after_existing_ones() {
        let a = Map::from([(Key::Index(5), Value::from("x")), (Key::new("k"), Value::from(1))]);
        let b = Map::from([(Key::Index(5), Value::from("y"))]);
        assert_eq!(
            merge(&a, &b),
            Map::from([
                (Key::Index(5), Value::from("x")),
                (Key::new("k"), Value::from(1)),
                (Key::Index(6), Value::from("y")),
            ])
        );
    }

    #[test]
    fn merge_lists_append() {
        assert_eq!(merge(&Map::list([1, 2]), &Map::list([3])), Map::list([1, 2, 3]));
    }

    #[test]
    fn pluck_with_and_without_keys() {
        let rows = map(json!([
            {"id": 10, "user": {"name": "Ann"}},
            {"id": 20, "user": {"name": "Bo"}},
            {"id": 30},
        ]));
        assert_eq!(pluck(&rows, "user.name"), map(json!(["Ann", "Bo", null])));
        assert_eq!(
            pluck_keyed(&rows, "user.name", "id"),
            Map::from([
                (Key::Index(10), Value::from("Ann")),
                (Key::Index(20), Value::from("Bo")),
                (Key::Index(30), Value::Null),
            ])
        );
    }

    #[test]
    fn only_and_except_keep_order() {
        let m = map(json!({"a": 1, "b": 2, "c": 3}));
        assert_eq!(only(&m, ["c", "a"]), map(json!({"a": 1, "c": 3})));
        assert_eq!(except(&m, ["b"]), map(json!({"a": 1, "c": 3})));
    }

    #[test]
    fn random_rejects_oversized_requests() {
        let m = Map::list([1, 2, 3]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            random(&m, 4, &mut rng),
            Err(Error::NotEnoughItems {
                requested: 4,
                available: 3
            })
        );
        let picked = random(&m, 2, &mut rng).unwrap();
        assert_eq!(picked.len(), 2);
        assert!(picked.is_sequential());
        assert_eq!(random(&m, 3, &mut rng).unwrap(), m);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let m = Map::list(0..20);
        assert_eq!(shuffle(&m, Some(42)), shuffle(&m, Some(42)));
        let mut sorted: Vec<f64> = shuffle(&m, None)
            .values()
            .filter_map(Value::as_f64)
            .collect();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(Map::list(sorted), m);
    }
}
