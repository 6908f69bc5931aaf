//! # jsonbranch_core
//!
//! Path-driven tree navigation engine for jsonbranch.
//!
//! This crate provides:
//! - The [`TraversalVisitor`] contract and the [`TreeWalker`] that drives it
//! - [`PathLocator`] to find which paths exist in a tree
//! - [`TreeExtractor`] to copy only the branches reached by a set of paths
//! - [`NavigateConfig`] for the path delimiter and event tracing
//!
//! ## Architecture
//!
//! Trees are `serde_json` values. The source is only ever borrowed; results
//! are new, independently owned values. Each call owns all of its state, so
//! locators and extractors can be shared between threads.
//!
//! ## Example
//!
//! ```rust
//! use jsonbranch_core::{PathLocator, TreeExtractor};
//! use serde_json::json;
//!
//! let source = json!({ "a": { "b": 1, "c": 2, "d": 3 } });
//!
//! let found = PathLocator::new(["a.b", "a.x"]).find(source.as_object()).unwrap();
//! assert_eq!(found, ["a.b"]);
//!
//! let copy = TreeExtractor::new(["a.b", "a.c"]).copy(source.as_object()).unwrap();
//! assert_eq!(copy, Some(json!({ "a": { "b": 1, "c": 2 } })));
//! ```

mod config;
mod error;
mod extract;
mod locate;
pub mod visitor;
mod walker;

pub use config::NavigateConfig;
pub use error::NavigateError;
pub use extract::{CopyPathsVisitor, TreeExtractor};
pub use locate::{LocatePathsVisitor, PathLocator};
pub use visitor::{NavigateResult, Slot, Step, TraversalVisitor};
pub use walker::TreeWalker;

pub use jsonbranch_path::{PathDelimiter, PathError, PathSpec};

/// An object node of a source or result tree.
pub type Object = serde_json::Map<String, serde_json::Value>;

/// Returns the paths of `paths` present in `source`.
///
/// Shorthand for [`PathLocator::find`] with the default configuration.
pub fn locate<I, S>(source: Option<&Object>, paths: I) -> NavigateResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    PathLocator::new(paths).find(source)
}

/// Copies the branches of `source` reached by `paths`.
///
/// Shorthand for [`TreeExtractor::copy`] with the default configuration.
pub fn copy<I, S>(source: Option<&Object>, paths: I) -> NavigateResult<Option<serde_json::Value>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    TreeExtractor::new(paths).copy(source)
}
