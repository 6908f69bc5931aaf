//! Path-driven tree walker.
//!
//! [`TreeWalker`] follows each requested path through the source tree and
//! reports what it meets to a [`TraversalVisitor`]:
//!
//! - Object keys are matched exactly, one segment per level.
//! - Arrays are transparent: the next segment applies to the keys inside each
//!   element, so one path can match many elements.
//! - A path that ends on a container enters it and reports every direct child
//!   as a leaf.
//! - A leaf met while segments remain is a premature branch end.
//!
//! The walk uses an explicit frame stack, so nesting depth is bounded by
//! memory rather than by the call stack.

use std::iter::Enumerate;
use std::slice;

use jsonbranch_path::PathSpec;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::visitor::{NavigateResult, Slot, Step, TraversalVisitor};
use crate::{NavigateConfig, NavigateError, Object};

/// Drives a [`TraversalVisitor`] over a source tree, one path at a time.
#[derive(Debug, Clone, Default)]
pub struct TreeWalker {
    trace_events: bool,
}

/// One open level of the walk.
enum Frame<'s> {
    /// Object to be matched against the segment at `cursor`.
    Lookup {
        node: &'s Object,
        cursor: usize,
        done: bool,
        root: bool,
    },
    /// Object the path ended on.
    Members(serde_json::map::Iter<'s>),
    /// Array whose elements are matched against the segment at `cursor`.
    Elements {
        items: Enumerate<slice::Iter<'s, Value>>,
        cursor: usize,
    },
}

/// Per-path walk state.
struct PathWalk<'p> {
    path: &'p PathSpec,
    matched: usize,
    trace_events: bool,
}

impl TreeWalker {
    /// Creates a walker configured from `config`.
    pub fn new(config: &NavigateConfig) -> Self {
        Self {
            trace_events: config.trace_events,
        }
    }

    /// Walks every path in `paths` through `source` and returns the
    /// visitor's result.
    ///
    /// Errors raised by the visitor are handled per path according to its
    /// failure hooks; no result is returned alongside an error.
    pub fn walk<'s, V>(
        &self,
        mut visitor: V,
        source: Option<&'s Object>,
        paths: &[PathSpec],
    ) -> NavigateResult<V::Output>
    where
        V: TraversalVisitor<'s>,
    {
        let started = visitor.on_navigation_start(source, paths);

        match source {
            Some(root) if started => {
                debug!("Navigating {} path(s)", paths.len());

                let mut deferred: Option<NavigateError> = None;
                for path in paths {
                    let err = match self.walk_path(&mut visitor, root, path) {
                        Ok(()) => continue,
                        Err(err) => err,
                    };

                    if err.is_structural() {
                        return Err(err);
                    }
                    if visitor.fail_path_silently(path, &err) {
                        warn!("Skipping path '{}': {}", path, err);
                        continue;
                    }
                    if visitor.fail_path_fast(path, &err) {
                        return Err(err);
                    }

                    debug!("Deferring failure of path '{}': {}", path, err);
                    deferred.get_or_insert(err);
                }

                if let Some(err) = deferred {
                    return Err(err);
                }
            }
            _ => debug!("Navigation not started"),
        }

        visitor.on_navigation_end();
        Ok(visitor.result())
    }

    fn walk_path<'s, V>(
        &self,
        visitor: &mut V,
        root: &'s Object,
        path: &PathSpec,
    ) -> NavigateResult<()>
    where
        V: TraversalVisitor<'s>,
    {
        if !visitor.on_path_start(path)? {
            debug!("Path '{}' skipped by visitor", path);
            return Ok(());
        }

        let mut walk = PathWalk {
            path,
            matched: 0,
            trace_events: self.trace_events,
        };
        let mut stack = vec![Frame::Lookup {
            node: root,
            cursor: 0,
            done: false,
            root: true,
        }];

        while let Some(frame) = stack.last_mut() {
            let next = match frame {
                Frame::Lookup { done: true, root, .. } => {
                    let root = *root;
                    stack.pop();
                    if !root {
                        walk.event("object end");
                        visitor.on_object_end(path)?;
                    }
                    None
                }
                Frame::Lookup {
                    node, cursor, done, ..
                } => {
                    *done = true;
                    let (node, cursor) = (*node, *cursor);
                    walk.lookup(visitor, node, cursor)?
                }
                Frame::Members(members) => match members.next() {
                    Some((key, value)) => {
                        walk.matched += 1;
                        walk.event("object leaf");
                        visitor.on_object_leaf(path, key, value)?;
                        None
                    }
                    None => {
                        stack.pop();
                        walk.event("object end");
                        visitor.on_object_end(path)?;
                        None
                    }
                },
                Frame::Elements { items, cursor } => match items.next() {
                    Some((index, item)) => {
                        let cursor = *cursor;
                        walk.element(visitor, index, item, cursor)?
                    }
                    None => {
                        stack.pop();
                        walk.event("array end");
                        visitor.on_array_end(path)?;
                        None
                    }
                },
            };

            if let Some(frame) = next {
                stack.push(frame);
            }
        }

        if walk.matched > 0 {
            debug!("Path '{}' matched {} node(s)", path, walk.matched);
            visitor.on_path_end(path)
        } else {
            debug!("Path '{}' not found", path);
            visitor.on_path_not_found(path)
        }
    }
}

impl PathWalk<'_> {
    fn event(&self, name: &str) {
        if self.trace_events {
            trace!(path = %self.path, "{}", name);
        }
    }

    /// Matches the segment at `cursor` against the keys of `node`.
    fn lookup<'s, V>(
        &mut self,
        visitor: &mut V,
        node: &'s Object,
        cursor: usize,
    ) -> NavigateResult<Option<Frame<'s>>>
    where
        V: TraversalVisitor<'s>,
    {
        let path = self.path;
        let Some(segment) = path.segment(cursor) else {
            return Ok(None);
        };
        let Some((key, child)) = node.get_key_value(segment) else {
            self.event("tail not found");
            visitor.on_tail_not_found(path, cursor)?;
            return Ok(None);
        };

        let cursor = cursor + 1;
        match child {
            Value::Object(_) | Value::Array(_) => {
                self.enter(visitor, Slot::Key(key.as_str()), child, cursor)
            }
            _ if cursor < path.len() => {
                self.event("premature end");
                visitor.on_premature_end(path, cursor, child)?;
                Ok(None)
            }
            _ => {
                self.matched += 1;
                self.event("object leaf");
                visitor.on_object_leaf(path, key, child)?;
                Ok(None)
            }
        }
    }

    /// Handles one element of an array whose remaining segments start at `cursor`.
    fn element<'s, V>(
        &mut self,
        visitor: &mut V,
        index: usize,
        item: &'s Value,
        cursor: usize,
    ) -> NavigateResult<Option<Frame<'s>>>
    where
        V: TraversalVisitor<'s>,
    {
        if cursor >= self.path.len() {
            self.matched += 1;
            self.event("array leaf");
            visitor.on_array_leaf(self.path, index, item)?;
            return Ok(None);
        }

        match item {
            Value::Object(_) | Value::Array(_) => {
                self.enter(visitor, Slot::Index(index), item, cursor)
            }
            // Scalars cannot hold the remaining keys.
            _ => Ok(None),
        }
    }

    /// Announces a container and returns the frame that walks it.
    fn enter<'s, V>(
        &mut self,
        visitor: &mut V,
        slot: Slot<'s>,
        node: &'s Value,
        cursor: usize,
    ) -> NavigateResult<Option<Frame<'s>>>
    where
        V: TraversalVisitor<'s>,
    {
        let path = self.path;
        let step = Step::new(slot, cursor);
        let terminal = step.is_terminal(path);

        // Reaching a container with every segment consumed is a match even
        // if the visitor declines its contents.
        if terminal {
            self.matched += 1;
        }

        let frame = match node {
            Value::Object(map) => {
                self.event("object enter");
                if !visitor.on_object_enter(path, step, map)? {
                    return Ok(None);
                }
                if terminal {
                    Frame::Members(map.iter())
                } else {
                    Frame::Lookup {
                        node: map,
                        cursor,
                        done: false,
                        root: false,
                    }
                }
            }
            Value::Array(items) => {
                self.event("array enter");
                if !visitor.on_array_enter(path, step, items)? {
                    return Ok(None);
                }
                Frame::Elements {
                    items: items.iter().enumerate(),
                    cursor,
                }
            }
            _ => return Ok(None),
        };

        Ok(Some(frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every event as a short line.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        skip: Option<&'static str>,
        decline_containers: bool,
    }

    impl Recorder {
        fn push(&mut self, event: String) -> NavigateResult<()> {
            self.events.push(event);
            Ok(())
        }
    }

    impl<'s> TraversalVisitor<'s> for Recorder {
        type Output = Vec<String>;

        fn on_navigation_start(&mut self, source: Option<&'s Object>, paths: &[PathSpec]) -> bool {
            self.events.push(format!("start {}", paths.len()));
            source.is_some()
        }

        fn on_path_start(&mut self, path: &PathSpec) -> NavigateResult<bool> {
            self.push(format!("path {}", path))?;
            Ok(self.skip != Some(path.as_str()))
        }

        fn on_object_enter(
            &mut self,
            _path: &PathSpec,
            step: Step<'s>,
            _node: &'s Object,
        ) -> NavigateResult<bool> {
            self.push(format!("enter {} @{}", step.slot, step.cursor))?;
            Ok(!self.decline_containers)
        }

        fn on_array_enter(
            &mut self,
            _path: &PathSpec,
            step: Step<'s>,
            _node: &'s [Value],
        ) -> NavigateResult<bool> {
            self.push(format!("enter_array {} @{}", step.slot, step.cursor))?;
            Ok(!self.decline_containers)
        }

        fn on_object_leaf(
            &mut self,
            _path: &PathSpec,
            key: &'s str,
            value: &'s Value,
        ) -> NavigateResult<()> {
            self.push(format!("leaf {}={}", key, value))
        }

        fn on_array_leaf(
            &mut self,
            _path: &PathSpec,
            index: usize,
            value: &'s Value,
        ) -> NavigateResult<()> {
            self.push(format!("leaf [{}]={}", index, value))
        }

        fn on_object_end(&mut self, _path: &PathSpec) -> NavigateResult<()> {
            self.push("end".to_string())
        }

        fn on_array_end(&mut self, _path: &PathSpec) -> NavigateResult<()> {
            self.push("end_array".to_string())
        }

        fn on_premature_end(
            &mut self,
            _path: &PathSpec,
            cursor: usize,
            _leaf: &'s Value,
        ) -> NavigateResult<()> {
            self.push(format!("premature {}", cursor))
        }

        fn on_tail_not_found(&mut self, _path: &PathSpec, cursor: usize) -> NavigateResult<()> {
            self.push(format!("missing {}", cursor))
        }

        fn on_path_end(&mut self, path: &PathSpec) -> NavigateResult<()> {
            self.push(format!("found {}", path))
        }

        fn on_path_not_found(&mut self, path: &PathSpec) -> NavigateResult<()> {
            self.push(format!("not_found {}", path))
        }

        fn on_navigation_end(&mut self) {
            self.events.push("finish".to_string());
        }

        fn result(self) -> Vec<String> {
            self.events
        }
    }

    fn record(source: &Value, paths: &[&str]) -> Vec<String> {
        record_with(Recorder::default(), source, paths)
    }

    fn record_with(recorder: Recorder, source: &Value, paths: &[&str]) -> Vec<String> {
        let paths = PathSpec::parse_all(paths, Default::default()).unwrap();
        TreeWalker::default()
            .walk(recorder, source.as_object(), &paths)
            .unwrap()
    }

    #[test]
    fn walk_through_array_elements() {
        let source = json!({ "a": { "b": [{ "c": 1 }, { "d": 2 }, 3] } });

        assert_eq!(
            record(&source, &["a.b.c"]),
            [
                "start 1",
                "path a.b.c",
                "enter a @1",
                "enter_array b @2",
                "enter [0] @2",
                "leaf c=1",
                "end",
                "enter [1] @2",
                "missing 2",
                "end",
                "end_array",
                "end",
                "found a.b.c",
                "finish",
            ]
        );
    }

    #[test]
    fn walk_ending_on_object_reports_members() {
        let source = json!({ "a": { "x": 1, "y": [2] } });

        assert_eq!(
            record(&source, &["a"]),
            [
                "start 1",
                "path a",
                "enter a @1",
                "leaf x=1",
                "leaf y=[2]",
                "end",
                "found a",
                "finish",
            ]
        );
    }

    #[test]
    fn walk_ending_on_array_reports_elements() {
        let source = json!({ "a": [1, { "b": 2 }] });

        assert_eq!(
            record(&source, &["a"]),
            [
                "start 1",
                "path a",
                "enter_array a @1",
                "leaf [0]=1",
                "leaf [1]={\"b\":2}",
                "end_array",
                "found a",
                "finish",
            ]
        );
    }

    #[test]
    fn walk_reports_premature_end_and_missing_keys() {
        let source = json!({ "a": 5 });

        assert_eq!(
            record(&source, &["a.b", "x"]),
            [
                "start 2",
                "path a.b",
                "premature 1",
                "not_found a.b",
                "path x",
                "missing 0",
                "not_found x",
                "finish",
            ]
        );
    }

    #[test]
    fn walk_skips_paths_rejected_at_start() {
        let source = json!({ "a": 1, "b": 2 });
        let recorder = Recorder {
            skip: Some("a"),
            ..Default::default()
        };

        assert_eq!(
            record_with(recorder, &source, &["a", "b"]),
            ["start 2", "path a", "path b", "leaf b=2", "found b", "finish"]
        );
    }

    #[test]
    fn walk_declined_terminal_container_still_ends_path() {
        let source = json!({ "a": { "b": 1 }, "c": [1, 2] });
        let recorder = Recorder {
            decline_containers: true,
            ..Default::default()
        };

        assert_eq!(
            record_with(recorder, &source, &["a", "c", "a.b"]),
            [
                "start 3",
                "path a",
                "enter a @1",
                "found a",
                "path c",
                "enter_array c @1",
                "found c",
                "path a.b",
                "enter a @1",
                "not_found a.b",
                "finish",
            ]
        );
    }

    #[test]
    fn walk_without_source_only_starts_and_finishes() {
        let paths = PathSpec::parse_all(["a"], Default::default()).unwrap();
        let events = TreeWalker::default()
            .walk(Recorder::default(), None, &paths)
            .unwrap();

        assert_eq!(events, ["start 1", "finish"]);
    }

    #[test]
    fn walk_emits_balanced_container_events() {
        let source = json!({
            "a": [
                { "b": [{ "c": 1 }, [{ "c": 2 }, { "d": 3 }]] },
                [[{ "b": { "c": 4 } }]],
                { "b": 5 }
            ]
        });

        let events = record(&source, &["a.b.c", "a.b", "a"]);
        let opened = events.iter().filter(|e| e.starts_with("enter ")).count();
        let closed = events.iter().filter(|e| *e == "end").count();
        let opened_arrays = events.iter().filter(|e| e.starts_with("enter_array")).count();
        let closed_arrays = events.iter().filter(|e| *e == "end_array").count();

        assert_eq!(opened, closed);
        assert_eq!(opened_arrays, closed_arrays);
        assert!(events.contains(&"leaf c=4".to_string()));
        assert!(events.contains(&"premature 2".to_string()));
    }

    #[test]
    fn walk_handles_deep_nesting() {
        const DEPTH: usize = 1_000;

        let mut source = json!("bottom");
        for _ in 0..DEPTH {
            let mut object = Object::new();
            object.insert("k".to_string(), source);
            source = Value::Object(object);
        }
        let path = vec!["k"; DEPTH].join(".");

        let events = record(&source, &[path.as_str()]);
        assert_eq!(events.len(), 2 * DEPTH + 3);
        assert!(events.contains(&"leaf k=\"bottom\"".to_string()));
    }

    /// Fails on the `bad` key and logs the paths it completed.
    struct Failing {
        silently: bool,
        fast: bool,
        log: Rc<RefCell<Vec<String>>>,
    }

    impl Failing {
        fn new(silently: bool, fast: bool) -> (Self, Rc<RefCell<Vec<String>>>) {
            let log = Rc::new(RefCell::new(Vec::new()));
            let visitor = Self {
                silently,
                fast,
                log: Rc::clone(&log),
            };
            (visitor, log)
        }
    }

    impl<'s> TraversalVisitor<'s> for Failing {
        type Output = Vec<String>;

        fn on_object_leaf(
            &mut self,
            path: &PathSpec,
            key: &'s str,
            _value: &'s Value,
        ) -> NavigateResult<()> {
            if key == "bad" {
                return Err(NavigateError::visitor(path.as_str(), "bad key"));
            }
            Ok(())
        }

        fn on_premature_end(
            &mut self,
            path: &PathSpec,
            cursor: usize,
            _leaf: &'s Value,
        ) -> NavigateResult<()> {
            Err(NavigateError::path_shorter_than_source(
                path.as_str(),
                path.len() - cursor,
            ))
        }

        fn on_path_end(&mut self, path: &PathSpec) -> NavigateResult<()> {
            self.log.borrow_mut().push(path.to_string());
            Ok(())
        }

        fn fail_path_silently(&mut self, _path: &PathSpec, _err: &NavigateError) -> bool {
            self.silently
        }

        fn fail_path_fast(&mut self, _path: &PathSpec, _err: &NavigateError) -> bool {
            self.fast
        }

        fn result(self) -> Vec<String> {
            self.log.borrow().clone()
        }
    }

    fn walk_failing(visitor: Failing, paths: &[&str]) -> NavigateResult<Vec<String>> {
        let source = json!({ "a": 1, "bad": 2, "c": 3 });
        let paths = PathSpec::parse_all(paths, Default::default()).unwrap();
        TreeWalker::default().walk(visitor, source.as_object(), &paths)
    }

    #[test]
    fn failing_path_silently_continues() {
        let (visitor, _) = Failing::new(true, false);
        let found = walk_failing(visitor, &["a", "bad", "c"]).unwrap();
        assert_eq!(found, ["a", "c"]);
    }

    #[test]
    fn failing_path_fast_aborts() {
        let (visitor, log) = Failing::new(false, true);
        let err = walk_failing(visitor, &["a", "bad", "c"]).unwrap_err();

        assert!(matches!(err, NavigateError::Visitor { .. }));
        assert_eq!(*log.borrow(), ["a"]);
    }

    #[test]
    fn failing_path_deferred_walks_remaining_paths() {
        let (visitor, log) = Failing::new(false, false);
        let err = walk_failing(visitor, &["a", "bad", "c"]).unwrap_err();

        assert!(matches!(err, NavigateError::Visitor { .. }));
        assert_eq!(*log.borrow(), ["a", "c"]);
    }

    #[test]
    fn structural_failure_ignores_hooks() {
        let (visitor, log) = Failing::new(true, false);
        let err = walk_failing(visitor, &["a", "c.d", "bad"]).unwrap_err();

        assert!(err.is_structural());
        assert_eq!(*log.borrow(), ["a"]);
    }
}
