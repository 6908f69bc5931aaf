//! Visitor contract for path-driven traversal.
//!
//! A [`TraversalVisitor`] reacts to the structural events the
//! [`TreeWalker`](crate::TreeWalker) emits while following requested paths
//! through a source tree. Every method has a default implementation, so a
//! visitor only overrides the events it cares about.
//!
//! # Event order
//!
//! For one batch the walker emits:
//!
//! 1. [`on_navigation_start`](TraversalVisitor::on_navigation_start) once.
//! 2. Per path, in input order: [`on_path_start`](TraversalVisitor::on_path_start),
//!    then enter / leaf / end events as the path is followed, then either
//!    [`on_path_end`](TraversalVisitor::on_path_end) (something matched) or
//!    [`on_path_not_found`](TraversalVisitor::on_path_not_found).
//! 3. [`on_navigation_end`](TraversalVisitor::on_navigation_end) once, followed by
//!    [`result`](TraversalVisitor::result).
//!
//! Every accepted `on_object_enter` is closed by `on_object_end`, every
//! accepted `on_array_enter` by `on_array_end`.
//!
//! # Example
//!
//! ```rust
//! use jsonbranch_core::{NavigateResult, Object, PathSpec, TraversalVisitor, TreeWalker};
//! use serde_json::{Value, json};
//!
//! /// Sums every numeric leaf reached by the requested paths.
//! #[derive(Default)]
//! struct LeafSum(f64);
//!
//! impl<'s> TraversalVisitor<'s> for LeafSum {
//!     type Output = f64;
//!
//!     fn on_object_leaf(&mut self, _path: &PathSpec, _key: &'s str, value: &'s Value) -> NavigateResult<()> {
//!         self.0 += value.as_f64().unwrap_or(0.0);
//!         Ok(())
//!     }
//!
//!     fn result(self) -> f64 {
//!         self.0
//!     }
//! }
//!
//! let source = json!({ "items": [{ "price": 2 }, { "price": 3 }] });
//! let paths = vec![PathSpec::parse("items.price").unwrap()];
//! let total = TreeWalker::default()
//!     .walk(LeafSum::default(), source.as_object(), &paths)
//!     .unwrap();
//! assert_eq!(total, 5.0);
//! ```

use std::fmt;

use jsonbranch_path::PathSpec;
use serde_json::Value;

use crate::{NavigateError, Object};

/// Result type for visitor event handlers.
pub type NavigateResult<T> = Result<T, NavigateError>;

/// Position of a node inside its parent container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot<'s> {
    /// Entry of an object, by key.
    Key(&'s str),
    /// Element of an array, by position.
    Index(usize),
}

impl fmt::Display for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Key(key) => f.write_str(key),
            Slot::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Where an entered container sits and how much of the path led to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'s> {
    /// Position of the container in its parent.
    pub slot: Slot<'s>,
    /// Number of path segments consumed once inside the container.
    pub cursor: usize,
}

impl<'s> Step<'s> {
    /// Creates a new step.
    #[inline]
    pub fn new(slot: Slot<'s>, cursor: usize) -> Self {
        Self { slot, cursor }
    }

    /// Returns true if the path ends on this container.
    #[inline]
    pub fn is_terminal(&self, path: &PathSpec) -> bool {
        self.cursor >= path.len()
    }
}

/// Capability interface driven by the [`TreeWalker`](crate::TreeWalker).
///
/// # Lifetime
///
/// The `'s` lifetime ties the nodes handed to the visitor to the borrowed
/// source tree, so a visitor may keep references into the source for as long
/// as the walk lasts.
///
/// # Errors
///
/// An `Err` returned from any event handler stops the current path. The
/// walker then asks [`fail_path_silently`](Self::fail_path_silently) and
/// [`fail_path_fast`](Self::fail_path_fast) what to do with it, except for
/// structural errors (see [`NavigateError::is_structural`]) which always
/// abort the batch.
pub trait TraversalVisitor<'s> {
    /// Value returned by the walker once the batch is complete.
    type Output;

    /// Called once before any path is walked. Returning false skips every
    /// path and goes straight to [`on_navigation_end`](Self::on_navigation_end).
    fn on_navigation_start(&mut self, source: Option<&'s Object>, paths: &[PathSpec]) -> bool {
        source.is_some() && !paths.is_empty()
    }

    /// Called before a path is walked. Returning false skips the path.
    fn on_path_start(&mut self, _path: &PathSpec) -> NavigateResult<bool> {
        Ok(true)
    }

    /// Called when the path leads into an object. Returning false skips
    /// its contents (and its `on_object_end`).
    fn on_object_enter(
        &mut self,
        _path: &PathSpec,
        _step: Step<'s>,
        _node: &'s Object,
    ) -> NavigateResult<bool> {
        Ok(true)
    }

    /// Called when the path leads into an array. Returning false skips
    /// its elements (and its `on_array_end`).
    fn on_array_enter(
        &mut self,
        _path: &PathSpec,
        _step: Step<'s>,
        _node: &'s [Value],
    ) -> NavigateResult<bool> {
        Ok(true)
    }

    /// Called for a matched object entry that is not descended into.
    fn on_object_leaf(
        &mut self,
        _path: &PathSpec,
        _key: &'s str,
        _value: &'s Value,
    ) -> NavigateResult<()> {
        Ok(())
    }

    /// Called for a matched array element that is not descended into.
    fn on_array_leaf(
        &mut self,
        _path: &PathSpec,
        _index: usize,
        _value: &'s Value,
    ) -> NavigateResult<()> {
        Ok(())
    }

    /// Called when leaving an entered object.
    fn on_object_end(&mut self, _path: &PathSpec) -> NavigateResult<()> {
        Ok(())
    }

    /// Called when leaving an entered array.
    fn on_array_end(&mut self, _path: &PathSpec) -> NavigateResult<()> {
        Ok(())
    }

    /// Called when an object entry is a leaf but the path has segments left.
    ///
    /// `cursor` is the number of segments consumed, including the leaf's key.
    fn on_premature_end(
        &mut self,
        _path: &PathSpec,
        _cursor: usize,
        _leaf: &'s Value,
    ) -> NavigateResult<()> {
        Ok(())
    }

    /// Called when the key at `cursor` is missing from the current object.
    fn on_tail_not_found(&mut self, _path: &PathSpec, _cursor: usize) -> NavigateResult<()> {
        Ok(())
    }

    /// Called after a path that matched at least one node.
    fn on_path_end(&mut self, _path: &PathSpec) -> NavigateResult<()> {
        Ok(())
    }

    /// Called after a path that matched nothing.
    fn on_path_not_found(&mut self, _path: &PathSpec) -> NavigateResult<()> {
        Ok(())
    }

    /// Returns true to log the error and continue with the next path.
    fn fail_path_silently(&mut self, _path: &PathSpec, _err: &NavigateError) -> bool {
        false
    }

    /// Returns true to abort the batch with the error right away.
    ///
    /// When both hooks return false the remaining paths are still walked and
    /// the first such error is returned at the end of the batch.
    fn fail_path_fast(&mut self, _path: &PathSpec, _err: &NavigateError) -> bool {
        true
    }

    /// Called once after the last path.
    fn on_navigation_end(&mut self) {}

    /// Consumes the visitor and returns what it accumulated.
    fn result(self) -> Self::Output;
}
