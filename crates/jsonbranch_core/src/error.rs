//! Navigation error types.

use jsonbranch_path::PathError;
use thiserror::Error;

/// Errors that can occur while locating or copying paths.
#[derive(Debug, Error)]
pub enum NavigateError {
    /// A requested path is malformed.
    #[error(transparent)]
    InvalidPath(#[from] PathError),

    /// A path continues below a leaf of the source tree.
    #[error("Branch is shorter than path - path not found in source: '{path}' ({remaining} segment(s) left)")]
    PathShorterThanSource {
        /// The offending path.
        path: String,
        /// Segments left unconsumed when the leaf was reached.
        remaining: usize,
    },

    /// A path list entry is not a string.
    #[error("Path at index {index} is not a string")]
    NonStringPath {
        /// Position of the entry in the list.
        index: usize,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A visitor failed while handling an event.
    #[error("Visitor error on path '{path}': {message}")]
    Visitor {
        /// The path being walked.
        path: String,
        /// Error message.
        message: String,
    },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NavigateError {
    /// Creates a premature branch end error.
    pub fn path_shorter_than_source(path: impl Into<String>, remaining: usize) -> Self {
        Self::PathShorterThanSource {
            path: path.into(),
            remaining,
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a visitor error.
    pub fn visitor(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Visitor {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true for errors that abort the batch regardless of the
    /// visitor's failure hooks.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::PathShorterThanSource { .. })
    }
}
