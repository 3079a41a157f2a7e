//! Path resolution: `get` and `has`.

use tracing::trace;

use crate::{
    Error, IntoPath, Map, Result, Segment, Value, arr,
    container::Container,
    path::has_wildcard,
};

/// Resolves `path` against `root`.
///
/// Returns `None` when a literal segment is missing or a segment meets a
/// scalar. A wildcard fans out over every member; members that miss the rest
/// of the path contribute `null`. When the rest of the path contains another
/// wildcard, the fanned-out results are collapsed one level.
///
/// ```rust
/// use datapath::{get, Value};
///
/// let root: Value = serde_json::json!({"a": [{"x": [1, 2]}, {"x": [3]}]}).into();
/// assert_eq!(get(&root, "a.*.x").unwrap().to_string(), "[[1,2],[3]]");
/// assert_eq!(get(&root, "a.*.x.*").unwrap().to_string(), "[1,2,3]");
/// assert_eq!(get(&root, "a.5"), None);
/// ```
pub fn get(root: &Value, path: impl IntoPath) -> Option<Value> {
    let path = path.into_path();
    resolve(root, &path)
}

/// Like [`get`], substituting `default` on a miss.
pub fn get_or(root: &Value, path: impl IntoPath, default: impl Into<Value>) -> Value {
    get(root, path).unwrap_or_else(|| default.into())
}

/// Like [`get`], calling `default` only on a miss.
pub fn get_or_else<F>(root: &Value, path: impl IntoPath, default: F) -> Value
where
    F: FnOnce() -> Value,
{
    get(root, path).unwrap_or_else(default)
}

/// Resolves `path` and requires a keyed container there, returning its
/// items.
///
/// Unlike [`get`], a miss is an error: callers use this where nested data
/// has to be iterable.
///
/// # Errors
///
/// [`Error::NotAContainer`] if the path misses or ends on a scalar.
pub fn get_items(root: &Value, path: impl IntoPath) -> Result<Map> {
    let path = path.into_path();
    match resolve(root, &path) {
        Some(found) if found.is_container() => Ok(arr::into_items(found)),
        _ => Err(Error::NotAContainer {
            path: path.to_string(),
        }),
    }
}

/// Returns `true` if `path` exists in `root`.
///
/// A wildcard segment answers `true` as soon as it meets a container,
/// without checking the rest of the path against any member. The empty path
/// never exists.
pub fn has(root: &Value, path: impl IntoPath) -> bool {
    let path = path.into_path();
    if path.is_empty() {
        return false;
    }
    let mut current = root;
    for segment in path.iter() {
        let container = current.container();
        match segment {
            Segment::Wildcard => return !container.is_scalar(),
            Segment::Key(key) => match container.get(key) {
                Some(next) => current = next,
                None => return false,
            },
        }
    }
    true
}

pub(crate) fn resolve(target: &Value, segments: &[Segment]) -> Option<Value> {
    let mut current = target;
    for (i, segment) in segments.iter().enumerate() {
        let container = current.container();
        match segment {
            Segment::Wildcard => {
                let rest = &segments[i + 1..];
                return fan_out(container, rest);
            }
            Segment::Key(key) => current = container.get(key)?,
        }
    }
    Some(current.clone())
}

fn fan_out(container: Container<'_>, rest: &[Segment]) -> Option<Value> {
    if container.is_scalar() {
        return None;
    }
    let results: Map = container
        .members()
        .into_iter()
        .map(|(_, member)| resolve(member, rest).unwrap_or_default())
        .collect();
    trace!(members = results.len(), rest = rest.len(), "wildcard fan-out");
    if has_wildcard(rest) {
        Some(Value::Array(arr::collapse(results.values())))
    } else {
        Some(Value::Array(results))
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::{Collection, Object, path};

    fn fixture() -> Value {
        json!({
            "a": [{"x": [1, 2]}, {"x": [3]}],
            "user": {"name": "Ann", "nick": null},
            "posts": [{"title": "p1", "tags": ["x"]}, {"title": "p2"}],
        })
        .into()
    }

    #[rstest]
    #[case("user.name", Some(json!("Ann")))]
    #[case("user.nick", Some(json!(null)))]
    #[case("user.missing", None)]
    #[case("user.name.first", None)]
    #[case("a.0.x.1", Some(json!(2)))]
    #[case("a.*.x", Some(json!([[1, 2], [3]])))]
    #[case("a.*.x.*", Some(json!([1, 2, 3])))]
    #[case("posts.*.title", Some(json!(["p1", "p2"])))]
    #[case("posts.*.tags", Some(json!([["x"], null])))]
    #[case("user.name.*", None)]
    fn resolves_paths(#[case] path: &str, #[case] expected: Option<serde_json::Value>) {
        assert_eq!(get(&fixture(), path), expected.map(Value::from));
    }

    #[test]
    fn collapse_is_triggered_by_any_later_wildcard() {
        let root: Value = json!({
            "groups": [
                {"users": [{"tags": ["a", "b"]}]},
                {"users": [{"tags": ["c"]}, {"tags": ["d"]}]},
            ]
        })
        .into();
        // The second wildcard is two levels below the first; the outer result
        // still collapses.
        assert_eq!(
            get(&root, "groups.*.users.*.tags"),
            Some(json!([["a", "b"], ["c"], ["d"]]).into())
        );
        assert_eq!(
            get(&root, "groups.*.users.*.tags.*"),
            Some(json!(["a", "b", "c", "d"]).into())
        );
    }

    #[test]
    fn collapse_skips_scalar_results() {
        let root: Value = json!({"rows": [{"v": [1]}, {"v": 2}, {}]}).into();
        assert_eq!(get(&root, "rows.*.v.*"), Some(json!([1]).into()));
    }

    #[test]
    fn empty_path_returns_root() {
        let root = fixture();
        assert_eq!(get(&root, ""), Some(root.clone()));
        assert_eq!(get(&root, path![]), Some(root));
    }

    #[test]
    fn default_is_lazy() {
        let calls = Cell::new(0);
        let root = fixture();
        let make = || {
            calls.set(calls.get() + 1);
            Value::from("fallback")
        };
        assert_eq!(get_or_else(&root, "user.name", make), Value::from("Ann"));
        assert_eq!(calls.get(), 0);
        assert_eq!(get_or_else(&root, "user.age", make), Value::from("fallback"));
        assert_eq!(calls.get(), 1);
        assert_eq!(get_or(&root, "nope", 5), Value::from(5));
    }

    #[test]
    fn wildcard_over_collections_and_objects() {
        let users = Collection::from(vec![
            Value::object(Object::new().with("name", "Ann")),
            Value::object(Object::new().with("name", "Bo")),
        ]);
        let root = Value::Collection(users);
        assert_eq!(get(&root, "*.name"), Some(Value::list(["Ann", "Bo"])));
        assert_eq!(get(&root, "1.name"), Some(Value::from("Bo")));
    }

    #[rstest]
    #[case("user.name", true)]
    #[case("user.nick", true)]
    #[case("user.age", false)]
    #[case("a.*", true)]
    #[case("a.*.does.not.matter", true)]
    #[case("user.name.*", false)]
    #[case("", false)]
    fn has_paths(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(has(&fixture(), path), expected);
    }

    #[test]
    fn get_items_requires_a_container() {
        let root = fixture();
        assert_eq!(get_items(&root, "user").map(|m| m.len()), Ok(2));
        assert_eq!(get_items(&root, "posts.*.title").map(|m| m.len()), Ok(2));
        assert_eq!(
            get_items(&root, "user.name"),
            Err(Error::NotAContainer {
                path: "user.name".into()
            })
        );
        assert!(get_items(&root, "nope").is_err());
    }
}
