//! Named collection extensions.
//!
//! A [`Macros`] table maps names to functions over a [`Collection`]. It is
//! built once, up front, and then shared by reference; lookups never mutate
//! it.

use std::collections::HashMap;

use core::fmt;

use tracing::trace;

use crate::{Collection, Error, Result, Value};

type Extension = Box<dyn Fn(&Collection, &[Value]) -> Value + Send + Sync>;

/// A name → function table of collection extensions.
///
/// ```rust
/// use datapath::{Collection, Macros, Value};
///
/// let macros = Macros::new().register("double_sum", |items, _| {
///     Value::from(items.sum() * 2.0)
/// });
/// let items = Collection::from(vec![1, 2, 3]);
/// assert_eq!(items.call(&macros, "double_sum", &[]), Ok(Value::from(12)));
/// assert!(items.call(&macros, "missing", &[]).is_err());
/// ```
#[derive(Default)]
pub struct Macros {
    table: HashMap<String, Extension>,
}

impl Macros {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `f` under `name`, replacing any earlier registration.
    #[must_use]
    pub fn register<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Collection, &[Value]) -> Value + Send + Sync + 'static,
    {
        self.table.insert(name.into(), Box::new(f));
        self
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.table.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Runs the extension `name` against `items`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownMacro`] if nothing is registered under `name`.
    pub fn call(&self, name: &str, items: &Collection, args: &[Value]) -> Result<Value> {
        let f = self
            .table
            .get(name)
            .ok_or_else(|| Error::UnknownMacro(name.to_owned()))?;
        trace!(name, args = args.len(), "calling collection macro");
        Ok(f(items, args))
    }
}

impl fmt::Debug for Macros {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Macros").field("names", &self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;

    fn table() -> Macros {
        Macros::new()
            .register("titles", |items, _| Value::Array(items.pluck("title").into_items()))
            .register("nth", |items, args| {
                let n = args.first().map_or(Key::Index(0), Value::to_key);
                items.values().get(n).cloned().unwrap_or_default()
            })
    }

    #[test]
    fn registered_functions_receive_items_and_args() {
        let posts: Collection = serde_json::json!([{"title": "a"}, {"title": "b"}]).into();
        let macros = table();
        assert_eq!(
            posts.call(&macros, "titles", &[]),
            Ok(Value::list(["a", "b"]))
        );
        assert_eq!(
            posts.call(&macros, "nth", &[Value::from(1)]).map(|v| v.to_string()),
            Ok(r#"{"title":"b"}"#.to_owned())
        );
    }

    #[test]
    fn unknown_names_are_errors() {
        let macros = table();
        assert!(macros.has("titles"));
        assert_eq!(macros.names(), ["nth", "titles"]);
        assert_eq!(
            Collection::new().call(&macros, "nope", &[]),
            Err(Error::UnknownMacro("nope".into()))
        );
    }

    #[test]
    fn later_registrations_replace_earlier_ones() {
        let macros = Macros::new()
            .register("x", |_, _| Value::from(1))
            .register("x", |_, _| Value::from(2));
        assert_eq!(Collection::new().call(&macros, "x", &[]), Ok(Value::from(2)));
    }
}
