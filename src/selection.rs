//! The selection set: single source of truth for what is selected.
//!
//! Elements carry no selected flag of their own; membership in this set is
//! the only record, queried via [`SelectionSet::contains`]. Observers watch
//! the [`revision`](SelectionSet::revision) counter, which moves exactly once
//! per net change, instead of wiring per-element change handlers.

use crate::geometry::Rect;
use crate::graph::{ConnectionId, Graph, NodeId};
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// A selectable diagram element: a node or a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementId {
    Node(NodeId),
    Connection(ConnectionId),
}

impl From<NodeId> for ElementId {
    fn from(id: NodeId) -> Self {
        ElementId::Node(id)
    }
}

impl From<ConnectionId> for ElementId {
    fn from(id: ConnectionId) -> Self {
        ElementId::Connection(id)
    }
}

/// The set of currently selected elements.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    members: AHashSet<ElementId>,
    revision: u64,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `element` the sole selection. No-op when it already is.
    /// Returns whether the selection changed.
    pub fn select(&mut self, element: impl Into<ElementId>) -> bool {
        let element = element.into();
        if self.members.len() == 1 && self.members.contains(&element) {
            return false;
        }
        self.members.clear();
        self.members.insert(element);
        self.revision += 1;
        true
    }

    /// Adds `element` to the selection. Idempotent; returns whether the
    /// selection changed.
    pub fn add(&mut self, element: impl Into<ElementId>) -> bool {
        if self.members.insert(element.into()) {
            self.revision += 1;
            true
        } else {
            false
        }
    }

    /// Removes `element` from the selection. Idempotent; returns whether the
    /// selection changed.
    pub fn remove(&mut self, element: impl Into<ElementId>) -> bool {
        if self.members.remove(&element.into()) {
            self.revision += 1;
            true
        } else {
            false
        }
    }

    /// Clears the selection. One net change when the set was non-empty.
    pub fn clear(&mut self) -> bool {
        if self.members.is_empty() {
            return false;
        }
        self.members.clear();
        self.revision += 1;
        true
    }

    /// Re-evaluates a rubber-band rectangle against every node in `graph`:
    /// nodes whose bounds are fully contained in `rect` are selected, nodes
    /// not contained are deselected. Called continuously during the drag.
    ///
    /// Connections are untouched. One revision bump per call that changes
    /// membership, however many nodes flipped.
    pub fn rubber_band(&mut self, graph: &Graph, rect: Rect) -> bool {
        let mut changed = false;
        for node in graph.nodes() {
            let element = ElementId::Node(node.id);
            if rect.contains_rect(&node.bounds()) {
                changed |= self.members.insert(element);
            } else {
                changed |= self.members.remove(&element);
            }
        }
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Drops members that no longer exist in `graph`. Used after structural
    /// undo/redo, which can delete selected elements.
    pub fn prune(&mut self, graph: &Graph) -> bool {
        let before = self.members.len();
        self.members.retain(|e| match e {
            ElementId::Node(id) => graph.contains_node(*id),
            ElementId::Connection(id) => graph.contains_connection(*id),
        });
        if self.members.len() != before {
            self.revision += 1;
            true
        } else {
            false
        }
    }

    pub fn contains(&self, element: impl Into<ElementId>) -> bool {
        self.members.contains(&element.into())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Monotonic counter incremented once per net change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementId> {
        self.members.iter()
    }
}
