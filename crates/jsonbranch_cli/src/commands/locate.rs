//! Locate command implementation

use jsonbranch_core::{NavigateConfig, PathLocator};
use miette::{IntoDiagnostic, Result};
use tracing::debug;

use super::Document;
use crate::cli::InputArgs;

/// Prints the requested paths found in the input document.
pub fn run_locate(input: &InputArgs, config: NavigateConfig, json: bool) -> Result<()> {
    let document = Document::read(input.file.as_deref())?;

    let found = PathLocator::new(input.paths.iter().cloned())
        .with_config(config)
        .find(document.source()?)
        .into_diagnostic()?;
    debug!("Found {} of {} paths", found.len(), input.paths.len());

    if json {
        let output = serde_json::to_string(&found).into_diagnostic()?;
        println!("{}", output);
    } else {
        for path in &found {
            println!("{}", path);
        }
    }

    Ok(())
}
