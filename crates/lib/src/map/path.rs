//! Dotted paths for addressing values inside nested maps.
//!
//! [`Path`] and [`PathBuf`] follow the borrowed/owned pattern of
//! `std::path::Path`/`PathBuf`. A path is split on `.` exactly as written:
//! no segment is dropped or merged, so `"a..b"` addresses the empty key between
//! `a` and `b`, and the empty path addresses the empty key.
//!
//! # Usage
//!
//! ```rust
//! use dottable::{NestedMap, path};
//! use dottable::map::PathBuf;
//!
//! let mut map = NestedMap::new();
//! map.set_by_path("server.http.port", 8080)?;
//!
//! let built = PathBuf::new().push("server").push("http").push("port");
//! assert_eq!(map.get_by_path(&built)?, &8080);
//! assert_eq!(map.get_by_path(path!("server.http.port"))?, &8080);
//! # Ok::<(), dottable::map::MapError>(())
//! ```

use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

/// Separator between path segments
pub const SEPARATOR: char = '.';

/// A borrowed dotted path.
///
/// This type is unsized and always used behind a reference.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Path {
    inner: str,
}

/// An owned dotted path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathBuf {
    inner: String,
}

impl Path {
    /// Wraps a string slice as a path. Every string is a valid path.
    pub fn new(s: &str) -> &Path {
        // SAFETY: Path is repr(transparent) over str
        unsafe { &*(s as *const str as *const Path) }
    }

    /// Returns an iterator over the segments, in order.
    ///
    /// There is always at least one segment.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.inner.split(SEPARATOR)
    }

    /// Returns the number of segments
    pub fn len(&self) -> usize {
        self.segments().count()
    }

    /// Returns `true` if the path is the empty string (a single empty segment)
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Splits off the final segment: `"a.b.c"` becomes `(Some("a.b"), "c")`.
    pub fn split_last(&self) -> (Option<&Path>, &str) {
        match self.inner.rsplit_once(SEPARATOR) {
            Some((parent, last)) => (Some(Path::new(parent)), last),
            None => (None, &self.inner),
        }
    }

    /// Returns the parent path, or `None` for a single-segment path
    pub fn parent(&self) -> Option<&Path> {
        self.split_last().0
    }

    /// Returns the final segment
    pub fn last(&self) -> &str {
        self.split_last().1
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf {
            inner: self.inner.to_string(),
        }
    }
}

impl PathBuf {
    /// Creates a new empty path
    pub fn new() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Appends segments to the end of this path.
    ///
    /// The first push onto an empty path replaces it; later pushes are joined
    /// with the separator. A pushed string containing dots adds several segments.
    ///
    /// ```rust
    /// # use dottable::map::PathBuf;
    /// let path = PathBuf::new().push("user").push("profile.name");
    /// assert_eq!(path.as_str(), "user.profile.name");
    /// assert_eq!(path.len(), 3);
    /// ```
    pub fn push(mut self, segment: impl AsRef<str>) -> Self {
        if self.inner.is_empty() {
            self.inner = segment.as_ref().to_string();
        } else {
            self.inner.push(SEPARATOR);
            self.inner.push_str(segment.as_ref());
        }
        self
    }

    /// Joins another path onto this one
    pub fn join(self, other: impl AsRef<Path>) -> Self {
        self.push(other.as_ref().as_str())
    }

    pub fn as_path(&self) -> &Path {
        self
    }

    pub fn into_string(self) -> String {
        self.inner
    }
}

impl Deref for PathBuf {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        Path::new(&self.inner)
    }
}

impl AsRef<Path> for Path {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<Path> for PathBuf {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<Path> for str {
    fn as_ref(&self) -> &Path {
        Path::new(self)
    }
}

impl AsRef<Path> for String {
    fn as_ref(&self) -> &Path {
        Path::new(self)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for PathBuf {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Borrow<Path> for PathBuf {
    fn borrow(&self) -> &Path {
        self
    }
}

impl ToOwned for Path {
    type Owned = PathBuf;

    fn to_owned(&self) -> PathBuf {
        self.to_path_buf()
    }
}

impl FromStr for PathBuf {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for PathBuf {
    fn from(s: &str) -> Self {
        Self {
            inner: s.to_string(),
        }
    }
}

impl From<String> for PathBuf {
    fn from(inner: String) -> Self {
        Self { inner }
    }
}

impl From<&Path> for PathBuf {
    fn from(path: &Path) -> Self {
        path.to_path_buf()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

impl fmt::Display for PathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner)
    }
}

/// Constructs a path.
///
/// - `path!()` - empty path (`PathBuf`)
/// - `path!("user.profile.name")` - single literal (`&'static Path`, no allocation)
/// - `path!(base, "profile", "name")` - segments joined with `.` (`PathBuf`)
///
/// ```rust
/// # use dottable::path;
/// let literal = path!("user.profile");
/// assert_eq!(literal.len(), 2);
///
/// let id = 7;
/// let joined = path!("users", id, "name");
/// assert_eq!(joined.as_str(), "users.7.name");
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::map::PathBuf::new()
    };

    ($single:literal) => {
        $crate::map::Path::new($single)
    };

    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let path = $crate::map::PathBuf::new().push($first.to_string());
        $(
            let path = path.push($rest.to_string());
        )*
        path
    }};
}
