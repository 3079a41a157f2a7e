//! Dot-path addressing and an ordered collection algebra for nested data.
//!
//! Nested data is modelled as [`Value`]s: scalars, ordered [`Map`]s that
//! double as lists, [`Record`]s with named fields and nested
//! [`Collection`]s. Paths such as `"users.*.name"` address into any of
//! them:
//!
//! ```rust
//! use datapath::{fill, get, set, Value};
//!
//! let mut root = Value::Null;
//! set(&mut root, "users.0.name", "ada");
//! set(&mut root, "users.1.name", "grace");
//! fill(&mut root, "users.0.name", "ignored");
//!
//! assert_eq!(get(&root, "users.*.name").unwrap().to_string(), r#"["ada","grace"]"#);
//! assert_eq!(get(&root, "users.5.name"), None);
//! ```
//!
//! [`arr`] holds the stateless array algorithms (`dot`, `collapse`,
//! `flatten`, `merge`, `pluck`, ...) and [`Collection`] wraps them in an
//! order- and key-preserving functional API.

#![allow(missing_docs)]

/// Builds a [`Path`] from a heterogeneous list of names, indices and
/// segments. `"*"` becomes a wildcard.
///
/// ```rust
/// use datapath::{path, Key, Path, Segment};
///
/// let p = path!["users", 0, "*"];
/// assert_eq!(
///     p.segments(),
///     &[
///         Segment::Key(Key::Name("users".into())),
///         Segment::Key(Key::Index(0)),
///         Segment::Wildcard,
///     ]
/// );
/// assert_eq!(p, Path::parse("users.0.*"));
/// ```
#[macro_export]
macro_rules! path {
    ( $( $elem:expr ),* $(,)? ) => {{
        #[allow(unused_imports)]
        use $crate::SegmentFrom;
        $crate::Path::from($crate::vec![$($crate::Segment::from_segment($elem)),*])
    }};
}

mod access;
pub mod arr;
mod collection;
mod container;
mod error;
mod key;
mod macros;
mod map;
mod mutate;
mod options;
mod path;
mod record;
#[cfg(feature = "serde")]
mod serde_impls;
mod value;

#[cfg(test)]
mod tests;

pub use access::{get, get_items, get_or, get_or_else, has};
pub use collection::{Collection, by};
pub use container::{Container, ContainerMut};
pub use error::{Error, Result};
pub use key::Key;
pub use macros::Macros;
pub use map::Map;
pub use mutate::{fill, forget, set, set_with};
pub use options::{Equality, PathOptions};
pub use path::{IntoPath, Path, Segment, SegmentFrom};
pub use record::{Object, Record};
pub use value::Value;

#[doc(hidden)]
pub use std::vec;
