//! Copying the branches reached by a set of paths.
//!
//! [`TreeExtractor`] produces a new tree holding only the nodes on the
//! requested paths. Each path is copied into its own branch, which is then
//! deep-merged into the result:
//!
//! - objects reached by several paths are merged key by key;
//! - every matched array element is appended to the destination array, so
//!   two paths through the same array yield two sets of elements;
//! - paths missing from the source are ignored;
//! - a path running past a leaf of the source is an error for the whole
//!   batch.
//!
//! # Example
//!
//! ```rust
//! use jsonbranch_core::TreeExtractor;
//! use serde_json::json;
//!
//! let source = json!({ "k1": { "k2": "v1" }, "k3": { "k4": "v2" } });
//! let copy = TreeExtractor::new(["k1.k2"]).copy(source.as_object()).unwrap();
//! assert_eq!(copy, Some(json!({ "k1": { "k2": "v1" } })));
//! ```

mod arena;
mod merge;

use jsonbranch_path::PathSpec;
use serde_json::Value;
use tracing::debug;

use crate::visitor::{NavigateResult, Slot, Step, TraversalVisitor};
use crate::{NavigateConfig, NavigateError, Object, TreeWalker};

use arena::{BranchArena, NodeId};
use merge::merge_into;

/// Creates copies of source trees restricted to a set of paths.
#[derive(Debug, Clone, Default)]
pub struct TreeExtractor {
    paths: Vec<String>,
    config: NavigateConfig,
}

impl TreeExtractor {
    /// Creates an extractor for the given paths.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            config: NavigateConfig::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: NavigateConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the paths to copy.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Copies the branches of `source` reached by the configured paths.
    ///
    /// Returns `None` when `source` is absent and an empty object when no
    /// path matched.
    ///
    /// # Errors
    ///
    /// [`NavigateError::InvalidPath`] if a path is malformed (nothing is
    /// walked), [`NavigateError::PathShorterThanSource`] if a path continues
    /// below a leaf.
    pub fn copy(&self, source: Option<&Object>) -> NavigateResult<Option<Value>> {
        let paths = PathSpec::parse_all(&self.paths, self.config.delimiter)?;
        TreeWalker::new(&self.config).walk(CopyPathsVisitor::new(), source, &paths)
    }
}

/// Visitor rebuilding the matched branches of a source tree.
#[derive(Debug, Default)]
pub struct CopyPathsVisitor<'s> {
    result: Option<Object>,
    arena: BranchArena<'s>,
    stack: Vec<NodeId>,
}

impl<'s> CopyPathsVisitor<'s> {
    /// Creates a visitor with an absent result.
    pub fn new() -> Self {
        Self {
            result: None,
            arena: BranchArena::new(),
            stack: Vec::new(),
        }
    }

    fn reset_branch(&mut self) {
        self.arena.clear();
        self.stack.clear();
    }

    /// Attaches `node` to the top of the destination stack.
    fn attach(&mut self, slot: Slot<'s>, node: NodeId) -> NavigateResult<()> {
        let parent = *self
            .stack
            .last()
            .ok_or_else(|| NavigateError::internal("destination stack is empty"))?;
        self.arena.attach(parent, slot, node)
    }

    fn open(&mut self, path: &PathSpec, step: Step<'s>, node: NodeId) -> NavigateResult<bool> {
        self.attach(step.slot, node)?;
        self.stack.push(node);
        if step.is_terminal(path) {
            self.arena.mark_live(&self.stack);
        }
        Ok(true)
    }

    fn leaf(&mut self, slot: Slot<'s>, value: &'s Value) -> NavigateResult<()> {
        let node = self.arena.alloc_leaf(value);
        self.attach(slot, node)?;
        self.arena.mark_live(&self.stack);
        Ok(())
    }

    fn close(&mut self) -> NavigateResult<()> {
        self.stack
            .pop()
            .map(|_| ())
            .ok_or_else(|| NavigateError::internal("unbalanced container end"))
    }
}

impl<'s> TraversalVisitor<'s> for CopyPathsVisitor<'s> {
    type Output = Option<Value>;

    fn on_navigation_start(&mut self, source: Option<&'s Object>, paths: &[PathSpec]) -> bool {
        if source.is_none() {
            self.result = None;
            return false;
        }

        self.result = Some(Object::new());
        !paths.is_empty()
    }

    fn on_path_start(&mut self, _path: &PathSpec) -> NavigateResult<bool> {
        self.reset_branch();
        let root = self.arena.alloc_object();
        self.stack.push(root);
        Ok(true)
    }

    fn on_object_enter(
        &mut self,
        path: &PathSpec,
        step: Step<'s>,
        _node: &'s Object,
    ) -> NavigateResult<bool> {
        let node = self.arena.alloc_object();
        self.open(path, step, node)
    }

    fn on_array_enter(
        &mut self,
        path: &PathSpec,
        step: Step<'s>,
        _node: &'s [Value],
    ) -> NavigateResult<bool> {
        let node = self.arena.alloc_array();
        self.open(path, step, node)
    }

    fn on_object_leaf(
        &mut self,
        _path: &PathSpec,
        key: &'s str,
        value: &'s Value,
    ) -> NavigateResult<()> {
        self.leaf(Slot::Key(key), value)
    }

    fn on_array_leaf(
        &mut self,
        _path: &PathSpec,
        index: usize,
        value: &'s Value,
    ) -> NavigateResult<()> {
        self.leaf(Slot::Index(index), value)
    }

    fn on_object_end(&mut self, _path: &PathSpec) -> NavigateResult<()> {
        self.close()
    }

    fn on_array_end(&mut self, _path: &PathSpec) -> NavigateResult<()> {
        self.close()
    }

    fn on_premature_end(
        &mut self,
        path: &PathSpec,
        cursor: usize,
        _leaf: &'s Value,
    ) -> NavigateResult<()> {
        self.reset_branch();
        Err(NavigateError::path_shorter_than_source(
            path.as_str(),
            path.len().saturating_sub(cursor),
        ))
    }

    fn on_path_end(&mut self, path: &PathSpec) -> NavigateResult<()> {
        let branch = self.stack.first().and_then(|root| self.arena.build(*root));
        self.reset_branch();

        match (branch, self.result.as_mut()) {
            (Some(Value::Object(branch)), Some(result)) => {
                debug!("Merging branch of '{}' ({} key(s))", path, branch.len());
                merge_into(result, branch);
                Ok(())
            }
            (None, _) => Ok(()),
            _ => Err(NavigateError::internal(format!(
                "cannot merge branch of '{}'",
                path
            ))),
        }
    }

    fn on_path_not_found(&mut self, _path: &PathSpec) -> NavigateResult<()> {
        self.reset_branch();
        Ok(())
    }

    fn fail_path_fast(&mut self, _path: &PathSpec, _err: &NavigateError) -> bool {
        // A half-built branch is never merged; give up on the whole batch.
        self.reset_branch();
        true
    }

    fn result(self) -> Option<Value> {
        self.result.map(Value::Object)
    }
}
