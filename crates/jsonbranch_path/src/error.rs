//! Path parse error types.

use thiserror::Error;

/// Errors that can occur while parsing a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// The path string is empty.
    #[error("Invalid path: path is empty")]
    Empty,

    /// The path starts with the delimiter.
    #[error("Invalid path '{path}': starts with '{delimiter}'")]
    LeadingDelimiter {
        /// The offending path.
        path: String,
        /// Delimiter in use.
        delimiter: char,
    },

    /// The path ends with the delimiter.
    #[error("Invalid path '{path}': ends with '{delimiter}'")]
    TrailingDelimiter {
        /// The offending path.
        path: String,
        /// Delimiter in use.
        delimiter: char,
    },

    /// Two delimiters follow each other, leaving an empty key between them.
    #[error("Invalid path '{path}': empty key at segment {index}")]
    EmptySegment {
        /// The offending path.
        path: String,
        /// Zero-based index of the empty segment.
        index: usize,
    },
}

impl PathError {
    /// Creates a leading delimiter error.
    pub fn leading(path: impl Into<String>, delimiter: char) -> Self {
        Self::LeadingDelimiter {
            path: path.into(),
            delimiter,
        }
    }

    /// Creates a trailing delimiter error.
    pub fn trailing(path: impl Into<String>, delimiter: char) -> Self {
        Self::TrailingDelimiter {
            path: path.into(),
            delimiter,
        }
    }

    /// Creates an empty segment error.
    pub fn empty_segment(path: impl Into<String>, index: usize) -> Self {
        Self::EmptySegment {
            path: path.into(),
            index,
        }
    }

    /// Returns the path text that failed to parse.
    pub fn path(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::LeadingDelimiter { path, .. }
            | Self::TrailingDelimiter { path, .. }
            | Self::EmptySegment { path, .. } => path,
        }
    }
}
