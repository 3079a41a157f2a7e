/// Configuration for turning strings into [`Path`](crate::Path)s.
///
/// # Examples
///
/// ```rust
/// use datapath::{Path, PathOptions, Segment};
///
/// let options = PathOptions {
///     delimiter: '/',
///     ..Default::default()
/// };
/// let path = Path::parse_with("users/*/name", &options);
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[1], Segment::Wildcard);
/// ```
///
/// # Default
///
/// `.` as the delimiter and `*` as the wildcard token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathOptions {
    /// Character separating segments of a string path.
    ///
    /// There is no escaping: a key containing the delimiter can only be
    /// addressed with a pre-segmented path.
    ///
    /// # Default
    ///
    /// `'.'`
    pub delimiter: char,

    /// Segment text that fans out over every member of a container.
    ///
    /// # Default
    ///
    /// `"*"`
    pub wildcard: String,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            delimiter: '.',
            wildcard: "*".into(),
        }
    }
}

/// How two values are compared when deduplicating or searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Equality {
    /// Type-juggling comparison: `1 == "1"`, `null == ""`, `true == "x"`.
    #[default]
    Loose,
    /// Same variant and same contents.
    Strict,
}

impl Equality {
    /// Compares two values under this mode.
    #[must_use]
    pub fn eq(self, a: &crate::Value, b: &crate::Value) -> bool {
        match self {
            Equality::Loose => a.loose_eq(b),
            Equality::Strict => a == b,
        }
    }
}
