use std::{fmt, ops::Deref};

use crate::{Key, PathOptions};

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Address exactly one member.
    Key(Key),
    /// Fan out over every member of the current container.
    Wildcard,
}

impl Segment {
    #[must_use]
    /// Returns `true` for [`Segment::Wildcard`].
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    #[must_use]
    /// Returns the literal key, or `None` for a wildcard.
    pub fn as_key(&self) -> Option<&Key> {
        if let Self::Key(k) = self {
            Some(k)
        } else {
            None
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Key(k) => k.fmt(f),
            Segment::Wildcard => f.write_str("*"),
        }
    }
}

impl From<Key> for Segment {
    fn from(k: Key) -> Self {
        Self::Key(k)
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        if s == "*" {
            Self::Wildcard
        } else {
            Self::Key(Key::new(s))
        }
    }
}

#[doc(hidden)]
pub trait SegmentFrom<T> {
    fn from_segment(value: T) -> Segment;
}

macro_rules! impl_integer_as_segment {
    ($($t:ty),+) => {
        $(
            impl SegmentFrom<$t> for Segment {
                fn from_segment(value: $t) -> Self {
                    Segment::Key(Key::from(value))
                }
            }
        )+
    };
}
impl_integer_as_segment!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl SegmentFrom<&str> for Segment {
    fn from_segment(value: &str) -> Self {
        Segment::from(value)
    }
}

impl SegmentFrom<Key> for Segment {
    fn from_segment(value: Key) -> Self {
        Segment::Key(value)
    }
}

impl SegmentFrom<Segment> for Segment {
    fn from_segment(value: Segment) -> Self {
        value
    }
}

/// An ordered address into nested data.
///
/// The empty path denotes the root value itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    #[must_use]
    /// The empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `s` on `.`, turning `*` into a wildcard.
    ///
    /// ```rust
    /// use datapath::{Key, Path, Segment};
    ///
    /// let path = Path::parse("users.0.*");
    /// assert_eq!(
    ///     path.segments(),
    ///     &[
    ///         Segment::Key(Key::Name("users".into())),
    ///         Segment::Key(Key::Index(0)),
    ///         Segment::Wildcard,
    ///     ]
    /// );
    /// assert!(Path::parse("").is_empty());
    /// ```
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self::parse_with(s, &PathOptions::default())
    }

    /// Splits `s` using the delimiter and wildcard token from `options`.
    #[must_use]
    pub fn parse_with(s: &str, options: &PathOptions) -> Self {
        if s.is_empty() {
            return Self::new();
        }
        let segments = s
            .split(options.delimiter)
            .map(|part| {
                if part == options.wildcard {
                    Segment::Wildcard
                } else {
                    Segment::Key(Key::new(part))
                }
            })
            .collect();
        Self { segments }
    }

    /// Appends a segment.
    #[must_use]
    pub fn push(mut self, segment: impl Into<Segment>) -> Self {
        self.segments.push(segment.into());
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    /// Returns `true` if any segment is a wildcard.
    pub fn has_wildcard(&self) -> bool {
        has_wildcard(&self.segments)
    }
}

pub(crate) fn has_wildcard(segments: &[Segment]) -> bool {
    segments.iter().any(Segment::is_wildcard)
}

impl Deref for Path {
    type Target = [Segment];

    fn deref(&self) -> &Self::Target {
        &self.segments
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            segment.fmt(f)?;
        }
        Ok(())
    }
}

impl From<Vec<Segment>> for Path {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for Path {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Anything that can address nested data.
///
/// Strings are parsed with the default [`PathOptions`]; everything else is
/// taken as already segmented.
pub trait IntoPath {
    fn into_path(self) -> Path;
}

impl IntoPath for Path {
    fn into_path(self) -> Path {
        self
    }
}

impl IntoPath for &Path {
    fn into_path(self) -> Path {
        self.clone()
    }
}

impl IntoPath for &str {
    fn into_path(self) -> Path {
        Path::parse(self)
    }
}

impl IntoPath for String {
    fn into_path(self) -> Path {
        Path::parse(&self)
    }
}

impl IntoPath for &String {
    fn into_path(self) -> Path {
        Path::parse(self)
    }
}

impl IntoPath for Vec<Segment> {
    fn into_path(self) -> Path {
        Path::from(self)
    }
}

impl IntoPath for &[Segment] {
    fn into_path(self) -> Path {
        Path::from(self.to_vec())
    }
}

impl IntoPath for Key {
    fn into_path(self) -> Path {
        Path::from(vec![Segment::Key(self)])
    }
}

impl IntoPath for &Key {
    fn into_path(self) -> Path {
        Path::from(vec![Segment::Key(self.clone())])
    }
}

impl IntoPath for usize {
    fn into_path(self) -> Path {
        Path::from(vec![Segment::Key(Key::Index(self))])
    }
}
