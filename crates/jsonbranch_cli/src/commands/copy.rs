//! Copy command implementation

use jsonbranch_core::{NavigateConfig, TreeExtractor};
use miette::{IntoDiagnostic, Result};
use serde_json::Value;

use super::Document;
use crate::cli::InputArgs;

/// Prints the branches of the input document reached by the requested paths.
///
/// A `null` document is copied as `null`.
pub fn run_copy(input: &InputArgs, config: NavigateConfig, pretty: bool) -> Result<()> {
    let document = Document::read(input.file.as_deref())?;

    let copied = TreeExtractor::new(input.paths.iter().cloned())
        .with_config(config)
        .copy(document.source()?)
        .into_diagnostic()?
        .unwrap_or(Value::Null);

    let output = if pretty {
        serde_json::to_string_pretty(&copied)
    } else {
        serde_json::to_string(&copied)
    }
    .into_diagnostic()?;
    println!("{}", output);

    Ok(())
}
