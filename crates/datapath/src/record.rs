//! Object-like containers.
//!
//! Records expose named members through field access instead of map
//! semantics. The accessor and mutator treat them like ordered maps whose
//! keys are the field names.

use core::fmt;

use crate::{Key, Map, Value};

/// A value with named, individually addressable fields.
///
/// Implementors choose how fields are stored. The serialization hooks let a
/// record control how it crosses the [`Collection::serialize`] boundary;
/// all of them default to `None`.
///
/// [`Collection::serialize`]: crate::Collection::serialize
pub trait Record: fmt::Debug {
    /// Reads a field.
    fn field(&self, name: &str) -> Option<&Value>;

    /// Borrows a field mutably.
    fn field_mut(&mut self, name: &str) -> Option<&mut Value>;

    /// Writes a field, creating it if needed.
    fn set_field(&mut self, name: &str, value: Value);

    /// Removes a field. Records with a fixed shape may ignore this.
    fn remove_field(&mut self, name: &str) -> Option<Value>;

    /// Field names in iteration order.
    fn field_names(&self) -> Vec<String>;

    /// Clones the record behind a fresh box.
    fn clone_record(&self) -> Box<dyn Record>;

    /// Custom serialized form, preferred over every other form.
    fn json_serialize(&self) -> Option<Value> {
        None
    }

    /// A JSON document describing this record.
    fn to_json(&self) -> Option<String> {
        None
    }

    /// A plain-array form of this record.
    fn to_array(&self) -> Option<Map> {
        None
    }

    /// Every field as a map, in field order.
    fn fields(&self) -> Map {
        self.field_names()
            .into_iter()
            .filter_map(|name| {
                let value = self.field(&name)?.clone();
                Some((Key::new(&name), value))
            })
            .collect()
    }
}

impl Clone for Box<dyn Record> {
    fn clone(&self) -> Self {
        self.clone_record()
    }
}

/// A property bag: the general-purpose [`Record`].
///
/// ```rust
/// use datapath::{get, Object, Value};
///
/// let post = Object::new().with("title", "Hello").with("id", 7);
/// let root = Value::object(post);
/// assert_eq!(get(&root, "title"), Some(Value::from("Hello")));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    properties: Map,
}

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Record::set_field`].
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set_field(name, value.into());
        self
    }
}

impl Record for Object {
    fn field(&self, name: &str) -> Option<&Value> {
        self.properties.get(&Key::new(name))
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.properties.get_mut(&Key::new(name))
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.properties.insert(name, value);
    }

    fn remove_field(&mut self, name: &str) -> Option<Value> {
        self.properties.remove(&Key::new(name))
    }

    fn field_names(&self) -> Vec<String> {
        self.properties.keys().map(ToString::to_string).collect()
    }

    fn clone_record(&self) -> Box<dyn Record> {
        Box::new(self.clone())
    }

    fn fields(&self) -> Map {
        self.properties.clone()
    }
}
