//! PathSpec definition.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::{PathDelimiter, PathError};

/// A parsed n-gram path.
///
/// Holds the ordered, non-empty key segments together with the text the path
/// was parsed from. Two paths are equal when their segments are equal,
/// regardless of the delimiter used to write them.
///
/// # Example
///
/// ```rust
/// use jsonbranch_path::PathSpec;
///
/// let path: PathSpec = "a.b.c".parse().unwrap();
/// assert_eq!(path.segment(1), Some("b"));
/// assert_eq!(path.as_str(), "a.b.c");
/// assert!(PathSpec::parse("a..b").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PathSpec {
    origin: String,
    segments: Vec<String>,
    delimiter: PathDelimiter,
}

impl PathSpec {
    /// Parses a dot-delimited path.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        Self::parse_with(path, PathDelimiter::Dot)
    }

    /// Parses a path using the given delimiter.
    pub fn parse_with(path: &str, delimiter: PathDelimiter) -> Result<Self, PathError> {
        let sep = delimiter.as_char();

        if path.is_empty() {
            return Err(PathError::Empty);
        }
        if path.starts_with(sep) {
            return Err(PathError::leading(path, sep));
        }
        if path.ends_with(sep) {
            return Err(PathError::trailing(path, sep));
        }

        let mut segments = Vec::new();
        for (index, segment) in path.split(sep).enumerate() {
            if segment.is_empty() {
                return Err(PathError::empty_segment(path, index));
            }
            segments.push(segment.to_string());
        }

        Ok(Self {
            origin: path.to_string(),
            segments,
            delimiter,
        })
    }

    /// Parses a batch of paths, stopping at the first malformed one.
    pub fn parse_all<I, S>(paths: I, delimiter: PathDelimiter) -> Result<Vec<Self>, PathError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        paths
            .into_iter()
            .map(|p| Self::parse_with(p.as_ref(), delimiter))
            .collect()
    }

    /// Returns the key segments from the root down.
    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the segment at `index`.
    #[inline]
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments.get(index).map(String::as_str)
    }

    /// Returns the segments not yet consumed at `cursor`.
    #[inline]
    pub fn remaining(&self, cursor: usize) -> &[String] {
        self.segments.get(cursor..).unwrap_or(&[])
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the path has no segments. Parsed paths never do.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the text this path was parsed from.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.origin
    }

    /// Returns the delimiter this path was parsed with.
    #[inline]
    pub fn delimiter(&self) -> PathDelimiter {
        self.delimiter
    }
}

impl PartialEq for PathSpec {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl Eq for PathSpec {}

impl Hash for PathSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.segments.hash(state);
    }
}

impl FromStr for PathSpec {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PathSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.origin)
    }
}
