//! Path delimiters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The character separating keys in a path.
///
/// Serialized as the delimiter character itself (`"."` or `"/"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathDelimiter {
    /// `a.b.c`
    #[default]
    #[serde(rename = ".")]
    Dot,
    /// `a/b/c`
    #[serde(rename = "/")]
    Slash,
}

impl PathDelimiter {
    /// Returns the delimiter character.
    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Slash => '/',
        }
    }

    /// Looks up the delimiter for a character, if it is supported.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Self::Dot),
            '/' => Some(Self::Slash),
            _ => None,
        }
    }
}

impl fmt::Display for PathDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
