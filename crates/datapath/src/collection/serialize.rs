//! Conversion to plain nested data.
//!
//! A plain value holds only scalars and [`Value::Array`]s: no records, no
//! nested collections. Both [`Collection::to_array`] and
//! [`Collection::serialize`] produce one; they differ in which record hooks
//! they honor.

use tracing::debug;

use super::Collection;
use crate::{Map, Record, Value};

impl Collection {
    /// The items as plain nested data.
    ///
    /// Records contribute their [`Record::to_array`] form, or their fields
    /// when they have none.
    #[must_use]
    pub fn to_array(&self) -> Map {
        plain_map(&self.items)
    }

    /// The items as plain nested data, honoring each record's preferred
    /// serialized form.
    ///
    /// For every record, the first available of these wins:
    /// [`Record::json_serialize`], [`Record::to_json`] (parsed; needs the
    /// `serde` feature), [`Record::to_array`], then its fields. The choice is
    /// made per item, and records nested inside those forms are resolved the
    /// same way.
    ///
    /// ```rust
    /// use datapath::{Collection, Object, Record, Value};
    ///
    /// #[derive(Debug, Clone)]
    /// struct Secret(Object);
    ///
    /// impl Record for Secret {
    ///     fn field(&self, name: &str) -> Option<&Value> { self.0.field(name) }
    ///     fn field_mut(&mut self, name: &str) -> Option<&mut Value> { self.0.field_mut(name) }
    ///     fn set_field(&mut self, name: &str, value: Value) { self.0.set_field(name, value) }
    ///     fn remove_field(&mut self, name: &str) -> Option<Value> { self.0.remove_field(name) }
    ///     fn field_names(&self) -> Vec<String> { self.0.field_names() }
    ///     fn clone_record(&self) -> Box<dyn Record> { Box::new(self.clone()) }
    ///     fn json_serialize(&self) -> Option<Value> { Some("redacted".into()) }
    /// }
    ///
    /// let mut items = Collection::new();
    /// items.push(Value::object(Secret(Object::new().with("pin", 1234))));
    /// items.push(Value::object(Object::new().with("pin", 1)));
    /// assert_eq!(items.to_json(), r#"["redacted",{"pin":1}]"#);
    /// ```
    #[must_use]
    pub fn serialize(&self) -> Map {
        self.items
            .iter()
            .map(|(k, v)| (k.clone(), serialized(v)))
            .collect()
    }

    /// [`serialize`](Self::serialize), rendered as JSON text.
    #[must_use]
    pub fn to_json(&self) -> String {
        Value::Array(self.serialize()).to_string()
    }
}

fn plain_map(map: &Map) -> Map {
    map.iter().map(|(k, v)| (k.clone(), plain(v))).collect()
}

fn plain(value: &Value) -> Value {
    match value {
        Value::Array(map) => Value::Array(plain_map(map)),
        Value::Collection(c) => Value::Array(c.to_array()),
        Value::Object(record) => {
            Value::Array(plain_map(&record.to_array().unwrap_or_else(|| record.fields())))
        }
        scalar => scalar.clone(),
    }
}

pub(crate) fn serialized(value: &Value) -> Value {
    match value {
        Value::Array(map) => {
            Value::Array(map.iter().map(|(k, v)| (k.clone(), serialized(v))).collect())
        }
        Value::Collection(c) => Value::Array(c.serialize()),
        Value::Object(record) => serialized_record(&**record),
        scalar => scalar.clone(),
    }
}

fn serialized_record(record: &dyn Record) -> Value {
    if let Some(custom) = record.json_serialize() {
        return serialized(&custom);
    }
    if let Some(parsed) = record.to_json().and_then(|json| parse_json(&json)) {
        return parsed;
    }
    let array = record.to_array().unwrap_or_else(|| record.fields());
    serialized(&Value::Array(array))
}

#[cfg(feature = "serde")]
fn parse_json(json: &str) -> Option<Value> {
    match serde_json::from_str::<serde_json::Value>(json) {
        Ok(parsed) => Some(parsed.into()),
        Err(err) => {
            debug!(%err, "record produced invalid JSON, falling back");
            None
        }
    }
}

#[cfg(not(feature = "serde"))]
fn parse_json(_json: &str) -> Option<Value> {
    debug!("JSON parsing needs the serde feature, falling back");
    None
}
