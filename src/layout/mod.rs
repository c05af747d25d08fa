//! Deterministic auto-arrange for tree-shaped graphs.
//!
//! A single bottom-up pass measures each subtree's extent along the cross
//! axis, then a top-down pass assigns absolute coordinates: children sit one
//! `level_offset` past their parent's far edge, stacked with `node_offset`
//! spacing, and every parent is centered on the span its children consume.
//! Children are visited in connection insertion order, so the result is
//! byte-for-byte reproducible for the same tree shape and node sizes.

use crate::error::LayoutError;
use crate::geometry::Point;
use crate::graph::{Graph, NodeId};
use crate::routing;
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

/// Axis along which tree levels advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutOrientation {
    /// Levels advance to the right; siblings stack vertically.
    Horizontal,
    /// Levels advance downward; siblings stack horizontally.
    Vertical,
}

/// Spacing constants for the arrange pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub orientation: LayoutOrientation,
    /// Gap between a parent's far edge and its children's near edge.
    pub level_offset: f64,
    /// Gap between adjacent sibling subtrees.
    pub node_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            orientation: LayoutOrientation::Horizontal,
            level_offset: 50.0,
            node_offset: 10.0,
        }
    }
}

/// Positions every node reachable from `root` and refreshes the routing of
/// the arranged connections. The root itself keeps its current position;
/// descendants are placed relative to it.
///
/// Returns the arranged node ids in visit (depth-first) order.
pub fn arrange(
    graph: &mut Graph,
    root: NodeId,
    config: &LayoutConfig,
) -> Result<Vec<NodeId>, LayoutError> {
    let mut extents = AHashMap::new();
    let mut seen = AHashSet::new();
    let mut visited = Vec::new();
    let root_extent = measure(graph, root, config, &mut extents, &mut seen, &mut visited)?;

    let root_node = graph.node(root).ok_or(LayoutError::NodeNotFound(root))?;
    let (level, span_start) = match config.orientation {
        LayoutOrientation::Horizontal => (
            root_node.position.x,
            root_node.position.y + root_node.size.height / 2.0 - root_extent / 2.0,
        ),
        LayoutOrientation::Vertical => (
            root_node.position.y,
            root_node.position.x + root_node.size.width / 2.0 - root_extent / 2.0,
        ),
    };
    assign(graph, root, level, span_start, config, &extents)?;

    for id in &visited {
        routing::refresh_node(graph, *id)?;
    }
    Ok(visited)
}

/// Bottom-up extent of the subtree rooted at `id` along the cross axis:
/// a leaf consumes its own size, an inner node the sum of its children plus
/// `(n - 1) * node_offset`.
fn measure(
    graph: &Graph,
    id: NodeId,
    config: &LayoutConfig,
    extents: &mut AHashMap<NodeId, f64>,
    seen: &mut AHashSet<NodeId>,
    visited: &mut Vec<NodeId>,
) -> Result<f64, LayoutError> {
    if !seen.insert(id) {
        return Err(LayoutError::NotATree(id));
    }
    visited.push(id);

    let node = graph.node(id).ok_or(LayoutError::NodeNotFound(id))?;
    let own = match config.orientation {
        LayoutOrientation::Horizontal => node.size.height,
        LayoutOrientation::Vertical => node.size.width,
    };

    let children = graph.children(id);
    let extent = if children.is_empty() {
        own
    } else {
        let mut sum = 0.0;
        for child in &children {
            sum += measure(graph, *child, config, extents, seen, visited)?;
        }
        sum + (children.len() - 1) as f64 * config.node_offset
    };
    extents.insert(id, extent);
    Ok(extent)
}

/// Top-down coordinate assignment: `level` is the subtree's near edge along
/// the layout axis, `span_start` the start of its consumed span on the cross
/// axis.
fn assign(
    graph: &mut Graph,
    id: NodeId,
    level: f64,
    span_start: f64,
    config: &LayoutConfig,
    extents: &AHashMap<NodeId, f64>,
) -> Result<(), LayoutError> {
    let extent = extents.get(&id).copied().unwrap_or_default();
    let node = graph.node(id).ok_or(LayoutError::NodeNotFound(id))?;
    let size = node.size;

    let (position, child_level) = match config.orientation {
        LayoutOrientation::Horizontal => (
            Point::new(level, span_start + (extent - size.height) / 2.0),
            level + size.width + config.level_offset,
        ),
        LayoutOrientation::Vertical => (
            Point::new(span_start + (extent - size.width) / 2.0, level),
            level + size.height + config.level_offset,
        ),
    };
    graph.set_position(id, position)?;

    let mut cursor = span_start;
    for child in graph.children(id) {
        assign(graph, child, child_level, cursor, config, extents)?;
        cursor += extents.get(&child).copied().unwrap_or_default() + config.node_offset;
    }
    Ok(())
}
