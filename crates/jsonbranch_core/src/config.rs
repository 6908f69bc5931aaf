//! Navigation configuration.

use std::fs;
use std::path::Path;

use jsonbranch_path::PathDelimiter;
use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::NavigateError;

/// Configuration shared by [`PathLocator`](crate::PathLocator) and
/// [`TreeExtractor`](crate::TreeExtractor).
///
/// Config files are JSON with comments allowed:
///
/// ```jsonc
/// {
///   // "." or "/"
///   "delimiter": "/",
///   "traceEvents": true
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct NavigateConfig {
    /// Character separating keys in requested paths.
    pub delimiter: PathDelimiter,

    /// Whether the walker logs every structural event at `trace` level.
    pub trace_events: bool,
}

impl NavigateConfig {
    /// Config file names looked up in a working directory, in order.
    pub const CONFIG_FILES: &'static [&'static str] = &[".jsonbranch.jsonc", ".jsonbranch.json"];

    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path delimiter.
    pub fn with_delimiter(mut self, delimiter: PathDelimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Enables or disables per-event trace logging.
    pub fn with_trace_events(mut self, yes: bool) -> Self {
        self.trace_events = yes;
        self
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.jsonbranch.jsonc`, `.jsonbranch.json`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NavigateError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            NavigateError::config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON (or JSONC) string.
    ///
    /// An empty document yields the default configuration.
    pub fn from_json(json: &str) -> Result<Self, NavigateError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| NavigateError::config(format!("Invalid JSON: {}", e)))?;

        match value {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| NavigateError::config(format!("Invalid config: {}", e))),
            None => Ok(Self::default()),
        }
    }
}
