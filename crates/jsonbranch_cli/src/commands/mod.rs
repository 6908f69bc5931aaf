//! Subcommand implementations

pub mod copy;
pub mod locate;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use jsonbranch_core::{NavigateConfig, Object, PathDelimiter};
use miette::{IntoDiagnostic, Result};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum InputError {
    #[error("Failed to read input '{path}': {source}")]
    #[diagnostic(code(jbranch::read))]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid JSON in '{path}': {source}")]
    #[diagnostic(code(jbranch::parse))]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Document root must be an object or null, found {kind}")]
    #[diagnostic(
        code(jbranch::root),
        help("paths are resolved from the keys of the top-level object")
    )]
    NotAnObject { kind: &'static str },
    #[error("Unsupported path delimiter '{0}'")]
    #[diagnostic(code(jbranch::delimiter), help("use '.' or '/'"))]
    Delimiter(char),
}

/// Builds the navigation configuration from the config file and flags.
pub fn load_config(config_path: Option<&Path>, delimiter: Option<char>) -> Result<NavigateConfig> {
    let mut config = match config_path {
        Some(path) => NavigateConfig::from_file(path).into_diagnostic()?,
        None => match find_default_config() {
            Some(path) => {
                debug!("Using config file {}", path.display());
                NavigateConfig::from_file(&path).into_diagnostic()?
            }
            None => NavigateConfig::default(),
        },
    };

    if let Some(c) = delimiter {
        let delimiter = PathDelimiter::from_char(c).ok_or(InputError::Delimiter(c))?;
        config = config.with_delimiter(delimiter);
    }

    Ok(config)
}

fn find_default_config() -> Option<PathBuf> {
    NavigateConfig::CONFIG_FILES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// A parsed input document.
pub struct Document {
    root: Value,
}

impl Document {
    /// Reads a document from `file`, or from stdin when `file` is `None`
    /// or `-`.
    pub fn read(file: Option<&Path>) -> Result<Self> {
        let (name, content) = match file {
            Some(path) if path != Path::new("-") => {
                let name = path.display().to_string();
                let content = fs::read_to_string(path).map_err(|source| InputError::Read {
                    path: name.clone(),
                    source,
                })?;
                (name, content)
            }
            _ => {
                let mut content = String::new();
                io::stdin()
                    .read_to_string(&mut content)
                    .map_err(|source| InputError::Read {
                        path: "<stdin>".to_string(),
                        source,
                    })?;
                ("<stdin>".to_string(), content)
            }
        };

        let root = serde_json::from_str(&content)
            .map_err(|source| InputError::Parse { path: name, source })?;
        debug!("Read document ({} bytes)", content.len());

        Ok(Self { root })
    }

    /// The top-level object, or `None` for a `null` document.
    pub fn source(&self) -> Result<Option<&Object>> {
        match &self.root {
            Value::Object(object) => Ok(Some(object)),
            Value::Null => Ok(None),
            other => Err(InputError::NotAnObject {
                kind: kind_of(other),
            }
            .into()),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
