//! Path writes: `set`, `fill` and `forget`.
//!
//! All writes go through `&mut Value`, so the caller's binding observes
//! auto-vivified containers and coerced roots directly. The root is handed
//! back for chaining.

use tracing::debug;

use crate::{IntoPath, Key, Segment, Value, container::ContainerMut};

/// Writes `value` at `path`, overwriting whatever is there.
///
/// Missing intermediate containers are created as empty maps. A scalar met
/// along the way is replaced by an empty map, discarding the scalar.
///
/// ```rust
/// use datapath::{get, set, Value};
///
/// let mut root = Value::empty_map();
/// set(&mut root, "users.0.name", "Ann");
/// set(&mut root, "users.1.name", "Bo");
/// assert_eq!(get(&root, "users.*.name"), Some(Value::list(["Ann", "Bo"])));
/// ```
pub fn set(root: &mut Value, path: impl IntoPath, value: impl Into<Value>) -> &mut Value {
    set_with(root, path, value, true)
}

/// Writes `value` at `path` only where nothing exists yet.
///
/// Intermediate containers are still created, and scalars in the way are
/// still replaced. A trailing wildcard never writes.
pub fn fill(root: &mut Value, path: impl IntoPath, value: impl Into<Value>) -> &mut Value {
    set_with(root, path, value, false)
}

/// The shared implementation of [`set`] and [`fill`].
pub fn set_with(
    root: &mut Value,
    path: impl IntoPath,
    value: impl Into<Value>,
    overwrite: bool,
) -> &mut Value {
    let path = path.into_path();
    let value = value.into();
    write(root, &path, &value, overwrite);
    root
}

fn write(target: &mut Value, segments: &[Segment], value: &Value, overwrite: bool) {
    let Some((segment, rest)) = segments.split_first() else {
        if overwrite && target.is_container() {
            *target = value.clone();
        }
        return;
    };

    match segment {
        Segment::Wildcard => {
            coerce_to_map(target);
            let mut container = target.container_mut();
            if !rest.is_empty() {
                container.for_each_member(|member| write(member, rest, value, overwrite));
            } else if overwrite {
                container.for_each_member(|member| *member = value.clone());
            }
        }
        Segment::Key(key) => {
            coerce_to_map(target);
            let mut container = target.container_mut();
            if rest.is_empty() {
                if overwrite || !container.has(key) {
                    container.set(key.clone(), value.clone());
                }
                return;
            }
            if !container.has(key) {
                container.set(key.clone(), Value::empty_map());
            }
            if let Some(child) = container.get_mut(key) {
                write(child, rest, value, overwrite);
            }
        }
    }
}

fn coerce_to_map(target: &mut Value) {
    if !target.is_container() {
        if !target.is_null() {
            debug!(discarded = %target, "replacing scalar with an empty map");
        }
        *target = Value::empty_map();
    }
}

/// Removes the entry at `path`. Missing paths are left alone.
///
/// ```rust
/// use datapath::{forget, has, Value};
///
/// let mut root: Value = serde_json::json!({"a": {"b": 1, "c": 2}}).into();
/// forget(&mut root, "a.b");
/// assert!(!has(&root, "a.b"));
/// assert!(has(&root, "a.c"));
/// ```
pub fn forget(root: &mut Value, path: impl IntoPath) -> Option<Value> {
    let path = path.into_path();
    remove(root, &path)
}

fn remove(target: &mut Value, segments: &[Segment]) -> Option<Value> {
    let (segment, rest) = segments.split_first()?;
    let mut container = target.container_mut();
    match (segment, rest.is_empty()) {
        (Segment::Key(key), true) => container.remove(key),
        (Segment::Key(key), false) => container.get_mut(key).and_then(|c| remove(c, rest)),
        (Segment::Wildcard, true) => {
            let keys: Vec<Key> = container.keys();
            let removed: Vec<Value> = keys.iter().filter_map(|k| container.remove(k)).collect();
            (!removed.is_empty()).then(|| Value::list(removed))
        }
        (Segment::Wildcard, false) => {
            let mut removed = Vec::new();
            container.for_each_member(|member| {
                if let Some(v) = remove(member, rest) {
                    removed.push(v);
                }
            });
            (!removed.is_empty()).then(|| Value::list(removed))
        }
    }
}
