//! Uniform keyed access over the container shapes a [`Value`] can take.
//!
//! Every decision about "can this value be indexed, and how" is made here,
//! in [`Value::container`] and [`Value::container_mut`]. Maps and nested
//! collections are *map-like*, records are *object-like*, and everything
//! else is a scalar.

use crate::{Key, Map, Record, Value};

/// Read-only view of a value's keyed-access capability.
#[derive(Debug, Clone, Copy)]
pub enum Container<'a> {
    MapLike(&'a Map),
    ObjectLike(&'a dyn Record),
    Scalar,
}

/// Mutable view of a value's keyed-access capability.
#[derive(Debug)]
pub enum ContainerMut<'a> {
    MapLike(&'a mut Map),
    ObjectLike(&'a mut dyn Record),
    Scalar,
}

impl Value {
    #[must_use]
    pub fn container(&self) -> Container<'_> {
        match self {
            Value::Array(map) => Container::MapLike(map),
            Value::Collection(c) => Container::MapLike(c.all()),
            Value::Object(record) => Container::ObjectLike(record.as_ref()),
            _ => Container::Scalar,
        }
    }

    pub fn container_mut(&mut self) -> ContainerMut<'_> {
        match self {
            Value::Array(map) => ContainerMut::MapLike(map),
            Value::Collection(c) => ContainerMut::MapLike(c.items_mut()),
            Value::Object(record) => ContainerMut::ObjectLike(record.as_mut()),
            _ => ContainerMut::Scalar,
        }
    }

    /// Returns `true` if path segments can be applied to this value.
    #[must_use]
    pub fn is_container(&self) -> bool {
        !matches!(self.container(), Container::Scalar)
    }
}

impl<'a> Container<'a> {
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(self, Container::Scalar)
    }

    #[must_use]
    pub fn has(&self, key: &Key) -> bool {
        match self {
            Container::MapLike(map) => map.contains_key(key),
            Container::ObjectLike(record) => record.field(&key.to_string()).is_some(),
            Container::Scalar => false,
        }
    }

    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&'a Value> {
        match *self {
            Container::MapLike(map) => map.get(key),
            Container::ObjectLike(record) => record.field(&key.to_string()),
            Container::Scalar => None,
        }
    }

    /// Members in iteration order. Scalars have none.
    #[must_use]
    pub fn members(&self) -> Vec<(Key, &'a Value)> {
        match *self {
            Container::MapLike(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
            Container::ObjectLike(record) => record
                .field_names()
                .into_iter()
                .filter_map(|name| {
                    let value = record.field(&name)?;
                    Some((Key::new(&name), value))
                })
                .collect(),
            Container::Scalar => Vec::new(),
        }
    }
}

impl ContainerMut<'_> {
    #[must_use]
    pub fn has(&self, key: &Key) -> bool {
        match self {
            ContainerMut::MapLike(map) => map.contains_key(key),
            ContainerMut::ObjectLike(record) => record.field(&key.to_string()).is_some(),
            ContainerMut::Scalar => false,
        }
    }

    pub fn get_mut(&mut self, key: &Key) -> Option<&mut Value> {
        match self {
            ContainerMut::MapLike(map) => map.get_mut(key),
            ContainerMut::ObjectLike(record) => record.field_mut(&key.to_string()),
            ContainerMut::Scalar => None,
        }
    }

    /// Writes `value` at `key`. Returns `false` for scalars.
    pub fn set(&mut self, key: Key, value: Value) -> bool {
        match self {
            ContainerMut::MapLike(map) => {
                map.insert(key, value);
                true
            }
            ContainerMut::ObjectLike(record) => {
                record.set_field(&key.to_string(), value);
                true
            }
            ContainerMut::Scalar => false,
        }
    }

    pub fn remove(&mut self, key: &Key) -> Option<Value> {
        match self {
            ContainerMut::MapLike(map) => map.remove(key),
            ContainerMut::ObjectLike(record) => record.remove_field(&key.to_string()),
            ContainerMut::Scalar => None,
        }
    }

    /// Keys in iteration order.
    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        match self {
            ContainerMut::MapLike(map) => map.keys().cloned().collect(),
            ContainerMut::ObjectLike(record) => {
                record.field_names().iter().map(|n| Key::new(n)).collect()
            }
            ContainerMut::Scalar => Vec::new(),
        }
    }

    /// Applies `f` to every member in order.
    pub fn for_each_member<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Value),
    {
        match self {
            ContainerMut::MapLike(map) => map.values_mut().for_each(f),
            ContainerMut::ObjectLike(record) => {
                for name in record.field_names() {
                    if let Some(member) = record.field_mut(&name) {
                        f(member);
                    }
                }
            }
            ContainerMut::Scalar => {}
        }
    }
}
