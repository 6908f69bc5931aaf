//! Locating which paths exist in a tree.

use indexmap::IndexSet;
use jsonbranch_path::PathSpec;
use serde_json::Value;
use tracing::trace;

use crate::visitor::{NavigateResult, Step, TraversalVisitor};
use crate::{NavigateConfig, NavigateError, Object, TreeWalker};

/// Searches a tree for paths and returns those found.
///
/// A path is found when its whole key chain leads to an existing node, leaf
/// or container. Paths that run past a leaf, or name a missing key, are
/// simply left out.
///
/// # Example
///
/// ```rust
/// use jsonbranch_core::PathLocator;
/// use serde_json::json;
///
/// let source = json!({ "a": { "b": 1 }, "c": [{ "d": true }] });
/// let found = PathLocator::new(["a.b", "a.x", "c.d", "a.b.c"])
///     .find(source.as_object())
///     .unwrap();
/// assert_eq!(found, ["a.b", "c.d"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathLocator {
    paths: Vec<String>,
    config: NavigateConfig,
}

impl PathLocator {
    /// Creates a locator for the given candidate paths.
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

    /// Creates a locator from a JSON array of path strings.
    pub fn from_json_array(paths: &[Value]) -> NavigateResult<Self> {
        let paths = paths
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value
                    .as_str()
                    .map(str::to_string)
                    .ok_or(NavigateError::NonStringPath { index })
            })
            .collect::<NavigateResult<Vec<_>>>()?;

        Ok(Self::new(paths))
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: NavigateConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the candidate paths.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Returns the candidate paths present in `source`, in candidate order
    /// and without duplicates.
    ///
    /// # Errors
    ///
    /// [`NavigateError::InvalidPath`] if a candidate is malformed.
    pub fn find(&self, source: Option<&Object>) -> NavigateResult<Vec<String>> {
        if self.paths.is_empty() {
            return Ok(Vec::new());
        }

        let paths = PathSpec::parse_all(&self.paths, self.config.delimiter)?;
        TreeWalker::new(&self.config).walk(LocatePathsVisitor::default(), source, &paths)
    }
}

/// Visitor recording every path that reached a node.
#[derive(Debug, Default)]
pub struct LocatePathsVisitor {
    found: IndexSet<String>,
}

impl LocatePathsVisitor {
    fn record(&mut self, path: &PathSpec) {
        if !self.found.contains(path.as_str()) {
            trace!("Found path '{}'", path);
            self.found.insert(path.as_str().to_string());
        }
    }
}

impl<'s> TraversalVisitor<'s> for LocatePathsVisitor {
    type Output = Vec<String>;

    fn on_object_enter(
        &mut self,
        path: &PathSpec,
        step: Step<'s>,
        _node: &'s Object,
    ) -> NavigateResult<bool> {
        if step.is_terminal(path) {
            self.record(path);
            // The contents of a found container add nothing.
            return Ok(false);
        }
        Ok(true)
    }

    fn on_array_enter(
        &mut self,
        path: &PathSpec,
        step: Step<'s>,
        _node: &'s [Value],
    ) -> NavigateResult<bool> {
        if step.is_terminal(path) {
            self.record(path);
            return Ok(false);
        }
        Ok(true)
    }

    fn on_object_leaf(
        &mut self,
        path: &PathSpec,
        _key: &'s str,
        _value: &'s Value,
    ) -> NavigateResult<()> {
        self.record(path);
        Ok(())
    }

    fn on_array_leaf(
        &mut self,
        path: &PathSpec,
        _index: usize,
        _value: &'s Value,
    ) -> NavigateResult<()> {
        self.record(path);
        Ok(())
    }

    fn result(self) -> Vec<String> {
        self.found.into_iter().collect()
    }
}
