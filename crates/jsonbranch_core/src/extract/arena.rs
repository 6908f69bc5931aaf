//! Index-based arena for destination branches.
//!
//! A branch is built while one path is walked: containers are allocated as
//! the walker enters them and leaves are attached as they are matched. Nodes
//! refer to each other by [`NodeId`], and a child is always allocated after
//! its parent, so the branch can be assembled bottom-up by visiting ids in
//! reverse without recursion.
//!
//! A container is *live* once a leaf has been attached somewhere beneath it
//! (or the path ended on it). Containers that never became live are left out
//! of the built branch.

use serde_json::Value;

use crate::visitor::{NavigateResult, Slot};
use crate::{NavigateError, Object};

/// Handle to a node in a [`BranchArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
enum BranchNode<'s> {
    Object(Vec<(&'s str, NodeId)>),
    Array(Vec<NodeId>),
    Leaf(&'s Value),
}

#[derive(Debug)]
struct Entry<'s> {
    node: BranchNode<'s>,
    live: bool,
}

/// Arena holding the destination nodes of one branch.
#[derive(Debug, Default)]
pub(crate) struct BranchArena<'s> {
    entries: Vec<Entry<'s>>,
}

impl<'s> BranchArena<'s> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Drops every node, keeping the allocation for the next branch.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn alloc_object(&mut self) -> NodeId {
        self.alloc(BranchNode::Object(Vec::new()), false)
    }

    pub(crate) fn alloc_array(&mut self) -> NodeId {
        self.alloc(BranchNode::Array(Vec::new()), false)
    }

    /// Leaves are live from the start.
    pub(crate) fn alloc_leaf(&mut self, value: &'s Value) -> NodeId {
        self.alloc(BranchNode::Leaf(value), true)
    }

    fn alloc(&mut self, node: BranchNode<'s>, live: bool) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(Entry { node, live });
        id
    }

    /// Attaches `child` to `parent`: keyed for objects, appended for arrays.
    pub(crate) fn attach(
        &mut self,
        parent: NodeId,
        slot: Slot<'s>,
        child: NodeId,
    ) -> NavigateResult<()> {
        let entry = self.entries.get_mut(parent.0).ok_or_else(|| {
            NavigateError::internal(format!("unknown branch node {}", parent.0))
        })?;

        match (&mut entry.node, slot) {
            (BranchNode::Object(members), Slot::Key(key)) => members.push((key, child)),
            (BranchNode::Array(elements), _) => elements.push(child),
            (BranchNode::Object(_), Slot::Index(index)) => {
                return Err(NavigateError::internal(format!(
                    "cannot attach array element {} to an object",
                    index
                )));
            }
            (BranchNode::Leaf(_), _) => {
                return Err(NavigateError::internal(format!(
                    "cannot attach '{}' to a leaf",
                    slot
                )));
            }
        }
        Ok(())
    }

    /// Marks the open chain `stack` live, from the top down to the first
    /// node that already is.
    ///
    /// `stack` must be an ancestor chain (root first); ancestors of a live
    /// node are then always live too.
    pub(crate) fn mark_live(&mut self, stack: &[NodeId]) {
        for id in stack.iter().rev() {
            let entry = &mut self.entries[id.0];
            if entry.live {
                break;
            }
            entry.live = true;
        }
    }

    /// Assembles the live part of the subtree at `root` into an owned value.
    ///
    /// Returns `None` if `root` is not live.
    pub(crate) fn build(&self, root: NodeId) -> Option<Value> {
        let mut built: Vec<Option<Value>> = Vec::with_capacity(self.entries.len());
        built.resize_with(self.entries.len(), || None);

        for index in (root.0..self.entries.len()).rev() {
            let entry = &self.entries[index];
            if !entry.live {
                continue;
            }

            let value = match &entry.node {
                BranchNode::Leaf(value) => (*value).clone(),
                BranchNode::Object(members) => {
                    let mut object = Object::new();
                    for (key, child) in members {
                        if let Some(value) = built[child.0].take() {
                            object.insert((*key).to_string(), value);
                        }
                    }
                    Value::Object(object)
                }
                BranchNode::Array(elements) => Value::Array(
                    elements
                        .iter()
                        .filter_map(|child| built[child.0].take())
                        .collect(),
                ),
            };
            built[index] = Some(value);
        }

        built.get_mut(root.0).and_then(Option::take)
    }
}
