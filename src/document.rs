//! Editor-facing orchestration: one graph, one undo log, one selection.
//!
//! Every mutation goes through a [`Document`] method, which applies the
//! change, records the matching [`Command`], and refreshes the routing of
//! affected connections, in that order. All of it is synchronous and
//! single-threaded; the caller drives it from discrete input events.

use crate::error::{DocumentError, GraphError, HistoryError, LayoutError};
use crate::geometry::Point;
use crate::graph::{Connection, ConnectionId, Graph, Node, NodeId};
use crate::history::{Command, History};
use crate::layout::{self, LayoutConfig};
use crate::routing;
use crate::selection::SelectionSet;
use ahash::AHashMap;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// The serialized form of a document. History and selection are transient
/// editor state and are not persisted.
#[derive(Serialize, Deserialize)]
struct DocumentArtifact {
    graph: Graph,
}

/// A diagram under edit.
#[derive(Debug, Clone, Default)]
pub struct Document {
    graph: Graph,
    history: History,
    selection: SelectionSet,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing graph, refreshing all connection geometry.
    pub fn from_graph(mut graph: Graph) -> Result<Self, GraphError> {
        routing::refresh_all(&mut graph)?;
        Ok(Self {
            graph,
            history: History::new(),
            selection: SelectionSet::new(),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionSet {
        &mut self.selection
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Adds a node and records the addition.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = self.graph.add_node(node);
        if let Some(stored) = self.graph.node(id) {
            let node = stored.clone();
            self.history.record(Command::AddNode { node });
        }
        id
    }

    /// Removes a node, every connection touching it, and its selection
    /// membership.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        let (node, connections) = self.graph.remove_node(id)?;
        self.selection.remove(id);
        for conn in &connections {
            self.selection.remove(conn.id);
        }
        self.history.record(Command::RemoveNode { node, connections });
        Ok(())
    }

    /// Connects `source`'s output to `sink`'s input slot, displacing any
    /// prior occupant, and routes the new connection.
    pub fn connect(
        &mut self,
        source: NodeId,
        sink: NodeId,
        sink_input: usize,
    ) -> Result<ConnectionId, GraphError> {
        let (id, displaced) = self.graph.connect(source, sink, sink_input)?;
        if let Some(prior) = &displaced {
            self.selection.remove(prior.id);
        }
        routing::refresh_connection(&mut self.graph, id)?;
        if let Some(connection) = self.graph.connection(id).cloned() {
            self.history.record(Command::Connect {
                connection,
                displaced,
            });
        }
        Ok(id)
    }

    /// Removes a connection and its selection membership.
    pub fn disconnect(&mut self, id: ConnectionId) -> Result<Connection, GraphError> {
        let connection = self.graph.disconnect(id)?;
        self.selection.remove(id);
        self.history.record(Command::Disconnect {
            connection: connection.clone(),
        });
        Ok(connection)
    }

    /// Moves a node and reroutes every connection touching it.
    pub fn move_node(&mut self, id: NodeId, to: Point) -> Result<(), GraphError> {
        let from = self.graph.set_position(id, to)?;
        routing::refresh_node(&mut self.graph, id)?;
        self.history.record(Command::MoveNode { id, from, to });
        Ok(())
    }

    /// Renames a node.
    pub fn rename_node(&mut self, id: NodeId, name: impl Into<String>) -> Result<(), GraphError> {
        let to = name.into();
        let from = self.graph.set_name(id, to.clone())?;
        self.history.record(Command::RenameNode { id, from, to });
        Ok(())
    }

    /// Auto-arranges the subtree under `root`, recording one move per node
    /// that actually changed position so the layout is undoable.
    pub fn arrange(&mut self, root: NodeId, config: &LayoutConfig) -> Result<(), LayoutError> {
        let before: AHashMap<NodeId, Point> =
            self.graph.nodes().map(|n| (n.id, n.position)).collect();
        let arranged = layout::arrange(&mut self.graph, root, config)?;
        for id in arranged {
            let Some(node) = self.graph.node(id) else {
                continue;
            };
            let to = node.position;
            if let Some(from) = before.get(&id).copied()
                && from != to
            {
                self.history.record(Command::MoveNode { id, from, to });
            }
        }
        Ok(())
    }

    /// Undoes the most recent command. A reverted command can move several
    /// endpoints at once, so all routing is refreshed afterwards.
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        self.history.undo(&mut self.graph)?;
        routing::refresh_all(&mut self.graph)?;
        self.selection.prune(&self.graph);
        Ok(())
    }

    /// Re-applies the most recently undone command.
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        self.history.redo(&mut self.graph)?;
        routing::refresh_all(&mut self.graph)?;
        self.selection.prune(&self.graph);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Serializes the document graph to the binary artifact format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        let artifact = DocumentArtifact {
            graph: self.graph.clone(),
        };
        encode_to_vec(&artifact, standard()).map_err(|e| DocumentError::Encode(e.to_string()))
    }

    /// Deserializes a document from the binary artifact format. The loaded
    /// document starts with a fresh history and empty selection; routing is
    /// refreshed as part of the load.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let (artifact, _): (DocumentArtifact, usize) = decode_from_slice(bytes, standard())
            .map_err(|e| DocumentError::Decode(e.to_string()))?;
        Self::from_graph(artifact.graph).map_err(|e| DocumentError::Decode(e.to_string()))
    }

    /// Saves the document artifact to a file.
    pub fn save(&self, path: &str) -> Result<(), DocumentError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| DocumentError::FileWrite {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        file.write_all(&bytes).map_err(|e| DocumentError::FileWrite {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Loads a document artifact from a file.
    pub fn from_file(path: &str) -> Result<Self, DocumentError> {
        let mut file = fs::File::open(path).map_err(|e| DocumentError::FileRead {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| DocumentError::FileRead {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }
}
