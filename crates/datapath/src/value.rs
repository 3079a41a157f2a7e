//! The dynamic value model.
//!
//! This module defines the [`Value`] enum, which represents any piece of
//! nested data the engine can address, together with the comparison rules
//! used by sorting and deduplication and a JSON rendering via `Display`.

use core::{cmp::Ordering, fmt};

use crate::{Collection, Key, Map, Record};

/// Any value the engine can address.
///
/// - `Null`, `Bool`, `Number` and `String` are scalars: no path segment
///   applies to them.
/// - `Array` is an ordered map that doubles as a list.
/// - `Object` is a record with named fields.
/// - `Collection` is a nested [`Collection`], addressed through its items.
///
/// # Examples
///
/// ```
/// use datapath::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key", "value");
/// map.insert("list", Value::list([1, 2]));
/// let v = Value::Array(map);
/// assert_eq!(v.to_string(), r#"{"key":"value","list":[1,2]}"#);
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Map),
    Object(Box<dyn Record>),
    Collection(Collection),
}

impl Value {
    /// A sequential array built from `values`.
    pub fn list<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::Array(Map::list(values))
    }

    /// An empty array.
    #[must_use]
    pub fn empty_map() -> Self {
        Self::Array(Map::new())
    }

    /// Boxes a record.
    pub fn object(record: impl Record + 'static) -> Self {
        Self::Object(Box::new(record))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        if let Self::Number(n) = self {
            Some(*n)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Self::Array(map) => Some(map),
            Self::Collection(c) => Some(c.all()),
            _ => None,
        }
    }

    /// Numeric interpretation used by the statistical reducers.
    ///
    /// Numbers are themselves, booleans are `0`/`1`, numeric strings are
    /// parsed, and everything else is `None`.
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(f64::from(u8::from(*b))),
            Self::String(s) => parse_numeric(s),
            _ => None,
        }
    }

    /// Truthiness: `null`, `false`, `0`, `""`, `"0"` and empty containers are
    /// false.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::String(s) => !(s.is_empty() || s == "0"),
            Self::Array(map) => !map.is_empty(),
            Self::Collection(c) => !c.is_empty(),
            Self::Object(_) => true,
        }
    }

    /// The map key this value stands for when used to name a group or an
    /// entry.
    #[must_use]
    pub fn to_key(&self) -> Key {
        match self {
            Self::Null => Key::Name("".into()),
            Self::Bool(b) => Key::Index(usize::from(*b)),
            Self::Number(n) => number_key(*n),
            Self::String(s) => Key::new(s),
            other => Key::new(&other.to_string()),
        }
    }

    /// Total ordering used by sorting.
    ///
    /// `null` sorts first. Numbers, booleans and numeric strings compare
    /// numerically, other strings lexicographically, containers by size.
    #[must_use]
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            (Self::String(a), Self::String(b)) => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => a.cmp(b),
            },
            _ => match (self.to_number(), other.to_number()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => match (self.container_len(), other.container_len()) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    _ => self.rank().cmp(&other.rank()),
                },
            },
        }
    }

    /// Type-juggling equality.
    ///
    /// ```rust
    /// use datapath::Value;
    ///
    /// assert!(Value::from(1).loose_eq(&Value::from("1")));
    /// assert!(Value::Null.loose_eq(&Value::from("")));
    /// assert!(!Value::from("abc").loose_eq(&Value::from(0)));
    /// ```
    #[must_use]
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(b), x) | (x, Self::Bool(b)) => *b == x.truthy(),
            (Self::Null, Self::String(s)) | (Self::String(s), Self::Null) => s.is_empty(),
            (Self::Null, x) | (x, Self::Null) => !x.truthy(),
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Number(n), Self::String(s)) | (Self::String(s), Self::Number(n)) => {
                parse_numeric(s).map_or_else(|| n.to_string() == *s, |m| m == *n)
            }
            (Self::String(a), Self::String(b)) => match (parse_numeric(a), parse_numeric(b)) {
                (Some(x), Some(y)) => x == y,
                _ => a == b,
            },
            _ => match (self.as_map(), other.as_map()) {
                (Some(a), Some(b)) => {
                    a.len() == b.len()
                        && a.iter()
                            .all(|(k, v)| b.get(k).is_some_and(|w| v.loose_eq(w)))
                }
                _ => self == other,
            },
        }
    }

    fn container_len(&self) -> Option<usize> {
        match self {
            Self::Array(map) => Some(map.len()),
            Self::Collection(c) => Some(c.len()),
            Self::Object(o) => Some(o.field_names().len()),
            _ => None,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Number(_) => 2,
            Self::String(_) => 3,
            Self::Array(_) | Self::Collection(_) | Self::Object(_) => 4,
        }
    }
}

pub(crate) fn parse_numeric(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let first = trimmed.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn number_key(n: f64) -> Key {
    if n.fract() == 0.0 && n >= 0.0 && n <= usize::MAX as f64 {
        Key::Index(n as usize)
    } else {
        Key::new(&n.to_string())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Collection(a), Self::Collection(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => a.fields() == b.fields(),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_number_for_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                    Self::Number(v as f64)
                }
            }
        )*
    };
}

impl_from_number_for_value!(f32, f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::String(v.clone())
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Array(v)
    }
}

impl From<Collection> for Value {
    fn from(v: Collection) -> Self {
        Self::Collection(v)
    }
}

impl From<Box<dyn Record>> for Value {
    fn from(v: Box<dyn Record>) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::list(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<Key> for Value {
    fn from(k: Key) -> Self {
        match k {
            Key::Index(i) => i.into(),
            Key::Name(n) => Self::String(n.to_string()),
        }
    }
}

impl From<&Key> for Value {
    fn from(k: &Key) -> Self {
        k.clone().into()
    }
}

/// Escapes control characters in a string for inclusion in a JSON string literal.
///
/// This function writes to the provided formatter, replacing characters such as
/// quotes, backslashes, control characters (<= U+001F), and Unicode line separators
/// with their JSON escape sequences.
pub(crate) fn write_escaped_string<W: fmt::Write>(src: &str, f: &mut W) -> fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

fn write_map(map: &Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if map.is_sequential() {
        f.write_str("[")?;
        for (i, v) in map.values().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    } else {
        f.write_str("{")?;
        for (i, (k, v)) in map.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str("\"")?;
            write_escaped_string(&k.to_string(), f)?;
            write!(f, "\":{v}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => f.write_str(if *b { "true" } else { "false" }),
            // Non-finite numbers have no JSON spelling.
            Value::Number(n) if !n.is_finite() => f.write_str("null"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(map) => write_map(map, f),
            Value::Collection(c) => write_map(c.all(), f),
            Value::Object(o) => {
                let fields = o.fields();
                if fields.is_empty() {
                    f.write_str("{}")
                } else {
                    write_map(&fields, f)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Value::Null, Value::from(0), true)]
    #[case(Value::Null, Value::from("0"), false)]
    #[case(Value::from(true), Value::from("yes"), true)]
    #[case(Value::from(false), Value::from("0"), true)]
    #[case(Value::from(1.5), Value::from("1.5"), true)]
    #[case(Value::from("10"), Value::from("1e1"), true)]
    #[case(Value::from("a"), Value::from("b"), false)]
    #[case(Value::list([1, 2]), Value::list(["1", "2"]), true)]
    fn loose_equality(#[case] a: Value, #[case] b: Value, #[case] expected: bool) {
        assert_eq!(a.loose_eq(&b), expected);
        assert_eq!(b.loose_eq(&a), expected);
    }

    #[rstest]
    #[case(Value::Null, Value::from(-5))]
    #[case(Value::from(2), Value::from(10))]
    #[case(Value::from("9"), Value::from("10"))]
    #[case(Value::from("apple"), Value::from("banana"))]
    #[case(Value::from(false), Value::from(3))]
    #[case(Value::list([1]), Value::list([1, 2]))]
    fn compare_orders_ascending(#[case] lower: Value, #[case] higher: Value) {
        assert_eq!(lower.compare(&higher), Ordering::Less);
        assert_eq!(higher.compare(&lower), Ordering::Greater);
    }

    #[rstest]
    #[case(Value::from(3), Key::Index(3))]
    #[case(Value::from(1.5), Key::Name("1.5".into()))]
    #[case(Value::from(-1), Key::Name("-1".into()))]
    #[case(Value::from(true), Key::Index(1))]
    #[case(Value::Null, Key::Name("".into()))]
    #[case(Value::from("7"), Key::Index(7))]
    fn value_to_key(#[case] value: Value, #[case] key: Key) {
        assert_eq!(value.to_key(), key);
    }

    #[test]
    fn display_renders_json() {
        let mut map = Map::new();
        map.insert("s", "a\"b\n");
        map.insert("n", 1.5);
        map.insert("l", Value::list([Value::Null, Value::from(true)]));
        assert_eq!(
            Value::Array(map).to_string(),
            r#"{"s":"a\"b\u000A","n":1.5,"l":[null,true]}"#
        );
        assert_eq!(Value::from(f64::NAN).to_string(), "null");
    }
}
