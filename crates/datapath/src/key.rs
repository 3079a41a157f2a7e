use std::{fmt, sync::Arc};

/// A literal key inside a [`Map`](crate::Map).
///
/// Keys are either non-negative integer indices or names. Strings that spell
/// a canonical non-negative integer (`"0"`, `"17"`, but not `"017"` or `"-1"`)
/// are normalized to [`Key::Index`], so `"3"` and `3` address the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(usize),
    Name(Arc<str>),
}

impl Key {
    /// Builds a key from text, normalizing integer-looking strings.
    #[must_use]
    pub fn new(s: &str) -> Self {
        parse_index(s).map_or_else(|| Self::Name(s.into()), Self::Index)
    }

    #[must_use]
    /// Returns the index if this key is an index, otherwise `None`.
    pub fn as_index(&self) -> Option<usize> {
        if let Self::Index(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    #[must_use]
    /// Returns the name if this key is a name, otherwise `None`.
    pub fn as_name(&self) -> Option<&str> {
        if let Self::Name(n) = self {
            Some(n)
        } else {
            None
        }
    }
}

fn parse_index(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    match bytes {
        [] => None,
        [b'0'] => Some(0),
        [b'0', ..] => None,
        _ if bytes.iter().all(u8::is_ascii_digit) => s.parse().ok(),
        _ => None,
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(n) => f.write_str(n),
        }
    }
}

// Convenient conversions so users can write `map.insert(0, ...)` or
// `map.insert("name", ...)`.
macro_rules! impl_from_int_for_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(i: $t) -> Self {
                    #[allow(clippy::cast_possible_truncation)]
                    Key::Index(i as usize)
                }
            }
        )*
    };
}

impl_from_int_for_key!(u8, u16, u32, u64, usize);

macro_rules! impl_from_signed_for_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Key {
                fn from(i: $t) -> Self {
                    usize::try_from(i).map_or_else(|_| Key::Name(i.to_string().into()), Key::Index)
                }
            }
        )*
    };
}

impl_from_signed_for_key!(i8, i16, i32, i64, isize);

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::new(s)
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::new(&s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::new(s)
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}
