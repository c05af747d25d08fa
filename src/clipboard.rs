//! Subtree copy/paste.
//!
//! A clip is a self-contained JSON payload tagged with a format string (the
//! hosting application scopes payloads by kind, e.g. "behavior" vs "bone").
//! Node positions are stored relative to the subtree root, so a paste lands
//! the whole subtree at the caller's position without carrying absolute
//! coordinates around.

use crate::document::Document;
use crate::error::{ClipboardError, GraphError};
use crate::geometry::{Point, Size};
use crate::graph::{Graph, InputConnector, Node, NodeId, OutputConnector};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// One node in a clip, positioned relative to the clip's root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipNode {
    pub name: String,
    pub offset: Point,
    pub size: Size,
    pub inputs: Vec<InputConnector>,
    pub output: Option<OutputConnector>,
}

/// One connection in a clip, endpoints given as indices into the clip's
/// node list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClipConnection {
    pub source: usize,
    pub sink: usize,
    pub sink_input: usize,
}

/// A serializable subtree, tagged with a format kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtreeClip {
    pub kind: String,
    pub nodes: Vec<ClipNode>,
    pub connections: Vec<ClipConnection>,
}

impl SubtreeClip {
    pub fn to_json(&self) -> Result<String, ClipboardError> {
        serde_json::to_string(self).map_err(|e| ClipboardError::Malformed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, ClipboardError> {
        serde_json::from_str(json).map_err(|e| ClipboardError::Malformed(e.to_string()))
    }
}

/// Copies the subtree reachable from `root` into a clip tagged `kind`.
///
/// Nodes are visited depth-first in child order; a node reachable twice is
/// copied once, with later connections referring back to the first copy.
pub fn copy_subtree(graph: &Graph, root: NodeId, kind: &str) -> Result<SubtreeClip, ClipboardError> {
    let root_node = graph.node(root).ok_or(GraphError::NodeNotFound(root))?;
    let origin = root_node.position;

    let mut indices: AHashMap<NodeId, usize> = AHashMap::new();
    let mut nodes = Vec::new();
    let mut connections = Vec::new();
    let mut stack = vec![root];
    let mut order = Vec::new();

    while let Some(id) = stack.pop() {
        if indices.contains_key(&id) {
            continue;
        }
        let Some(node) = graph.node(id) else {
            continue;
        };
        indices.insert(id, nodes.len());
        order.push(id);
        nodes.push(ClipNode {
            name: node.name.clone(),
            offset: Point::new(node.position.x - origin.x, node.position.y - origin.y),
            size: node.size,
            inputs: node.inputs.clone(),
            output: node.output.clone(),
        });
        // Depth-first in child order: push in reverse so the first child is
        // visited first.
        for child in graph.children(id).into_iter().rev() {
            stack.push(child);
        }
    }

    for id in order {
        for conn in graph.connections().filter(|c| c.source == id) {
            if let (Some(&source), Some(&sink)) = (indices.get(&id), indices.get(&conn.sink)) {
                connections.push(ClipConnection {
                    source,
                    sink,
                    sink_input: conn.sink_input,
                });
            }
        }
    }

    Ok(SubtreeClip {
        kind: kind.to_string(),
        nodes,
        connections,
    })
}

/// Pastes a clip into `document` with its root at `position`.
///
/// The clip's kind must match `expected_kind`. The document's undo log is
/// disabled for the duration, so the inner add/connect calls don't register
/// themselves; the paste as a whole is not undoable.
///
/// Returns the ids of the created nodes, clip order.
pub fn paste(
    document: &mut Document,
    clip: &SubtreeClip,
    expected_kind: &str,
    position: Point,
) -> Result<Vec<NodeId>, ClipboardError> {
    if clip.kind != expected_kind {
        return Err(ClipboardError::KindMismatch {
            expected: expected_kind.to_string(),
            found: clip.kind.clone(),
        });
    }

    let was_enabled = document.history().is_enabled();
    document.history_mut().set_enabled(false);
    let result = paste_inner(document, clip, position);
    document.history_mut().set_enabled(was_enabled);
    result
}

/// Checks a clip's connections against the clip's own node list, so a bad
/// payload is rejected before any node is created. Anything caught here
/// would otherwise fail halfway through the paste, stranding nodes the
/// disabled log cannot undo.
fn validate_clip(clip: &SubtreeClip) -> Result<(), ClipboardError> {
    for conn in &clip.connections {
        let (Some(source), Some(sink)) = (clip.nodes.get(conn.source), clip.nodes.get(conn.sink))
        else {
            return Err(ClipboardError::Malformed(format!(
                "connection references node index {} outside the clip",
                conn.source.max(conn.sink)
            )));
        };
        if conn.source == conn.sink {
            return Err(ClipboardError::Malformed(format!(
                "connection links clip node {} to itself",
                conn.source
            )));
        }
        if source.output.is_none() {
            return Err(ClipboardError::Malformed(format!(
                "connection sources clip node {}, which has no output",
                conn.source
            )));
        }
        if conn.sink_input >= sink.inputs.len() {
            return Err(ClipboardError::Malformed(format!(
                "input index {} is out of range for clip node {}, which has {} inputs",
                conn.sink_input,
                conn.sink,
                sink.inputs.len()
            )));
        }
    }
    Ok(())
}

fn paste_inner(
    document: &mut Document,
    clip: &SubtreeClip,
    position: Point,
) -> Result<Vec<NodeId>, ClipboardError> {
    validate_clip(clip)?;

    let mut created = Vec::with_capacity(clip.nodes.len());
    for clip_node in &clip.nodes {
        let mut node = Node::new(
            clip_node.name.clone(),
            position.offset(clip_node.offset.x, clip_node.offset.y),
            clip_node.size,
        );
        node.inputs = clip_node.inputs.clone();
        node.output = clip_node.output.clone();
        created.push(document.add_node(node));
    }

    for conn in &clip.connections {
        let (Some(&source), Some(&sink)) = (created.get(conn.source), created.get(conn.sink))
        else {
            return Err(ClipboardError::Malformed(format!(
                "connection references node index {} outside the clip",
                conn.source.max(conn.sink)
            )));
        };
        document.connect(source, sink, conn.sink_input)?;
    }
    Ok(created)
}
