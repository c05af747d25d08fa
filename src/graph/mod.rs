//! The diagram graph model: nodes, connectors, and directed connections.

use crate::error::GraphError;
use crate::geometry::Point;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

mod connection;
mod node;

pub use connection::{Connection, ConnectionGeometry, ConnectionId};
pub use node::{InputConnector, Node, NodeId, OutputConnector};

/// An id-allocating store of nodes and connections.
///
/// Iteration order over nodes and connections is insertion order, which makes
/// every traversal in this crate (child order, layout, clipboard walks)
/// deterministic.
///
/// Serializes as flat node/connection lists in insertion order, so the JSON
/// and artifact forms are diff-stable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "GraphSerde", into = "GraphSerde")]
pub struct Graph {
    nodes: AHashMap<NodeId, Node>,
    connections: AHashMap<ConnectionId, Connection>,
    node_order: Vec<NodeId>,
    connection_order: Vec<ConnectionId>,
    next_node_id: u64,
    next_connection_id: u64,
}

/// The serialized shape of a [`Graph`].
#[derive(Serialize, Deserialize)]
struct GraphSerde {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
}

impl From<Graph> for GraphSerde {
    fn from(graph: Graph) -> Self {
        Self {
            nodes: graph.nodes().cloned().collect(),
            connections: graph.connections().cloned().collect(),
        }
    }
}

impl From<GraphSerde> for Graph {
    fn from(serde_graph: GraphSerde) -> Self {
        let mut graph = Graph::default();
        for node in serde_graph.nodes {
            graph.insert_node(node);
        }
        for connection in serde_graph.connections {
            // Connections referencing missing nodes are dropped rather than
            // carried as dangling edges.
            let _ = graph.insert_connection(connection);
        }
        graph
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, assigning it a fresh id.
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        node.id = id;
        self.nodes.insert(id, node);
        self.node_order.push(id);
        id
    }

    /// Re-inserts a node under its existing id. Used by undo/redo replay to
    /// restore a removed node without changing its identity. If the id is
    /// already present the node is replaced in place, keeping one order
    /// entry.
    pub fn insert_node(&mut self, node: Node) {
        self.next_node_id = self.next_node_id.max(node.id.0 + 1);
        let id = node.id;
        if self.nodes.insert(id, node).is_none() {
            self.node_order.push(id);
        }
    }

    /// Removes a node and every connection touching it. Returns the removed
    /// node and connections (in insertion order) so callers can capture them
    /// for undo.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(Node, Vec<Connection>), GraphError> {
        let node = self.nodes.remove(&id).ok_or(GraphError::NodeNotFound(id))?;
        self.node_order.retain(|n| *n != id);

        let incident: Vec<ConnectionId> = self
            .connection_order
            .iter()
            .copied()
            .filter(|cid| {
                self.connections
                    .get(cid)
                    .is_some_and(|c| c.touches(id))
            })
            .collect();
        let mut removed = Vec::with_capacity(incident.len());
        for cid in incident {
            if let Some(conn) = self.connections.remove(&cid) {
                removed.push(conn);
            }
        }
        self.connection_order
            .retain(|cid| self.connections.contains_key(cid));

        Ok((node, removed))
    }

    /// Connects `source`'s output to `sink`'s input slot `sink_input`.
    ///
    /// At most one connection may terminate at a given input slot: if the
    /// slot is occupied, the prior occupant is removed first and returned as
    /// the displaced connection so callers can capture it for undo.
    ///
    /// The new connection carries no geometry until a routing refresh runs.
    pub fn connect(
        &mut self,
        source: NodeId,
        sink: NodeId,
        sink_input: usize,
    ) -> Result<(ConnectionId, Option<Connection>), GraphError> {
        if source == sink {
            return Err(GraphError::SelfConnection(source));
        }
        let source_node = self
            .nodes
            .get(&source)
            .ok_or(GraphError::NodeNotFound(source))?;
        if source_node.output.is_none() {
            return Err(GraphError::MissingOutput(source));
        }
        let sink_node = self.nodes.get(&sink).ok_or(GraphError::NodeNotFound(sink))?;
        if sink_input >= sink_node.inputs.len() {
            return Err(GraphError::InputOutOfRange {
                node: sink,
                index: sink_input,
                count: sink_node.inputs.len(),
            });
        }

        let displaced = match self.connection_at(sink, sink_input).map(|c| c.id) {
            Some(occupant) => Some(self.disconnect(occupant)?),
            None => None,
        };

        let id = ConnectionId(self.next_connection_id);
        self.next_connection_id += 1;
        self.connections.insert(
            id,
            Connection {
                id,
                source,
                sink,
                sink_input,
                geometry: None,
            },
        );
        self.connection_order.push(id);
        Ok((id, displaced))
    }

    /// Re-inserts a connection under its existing id. Used by undo/redo
    /// replay; the caller guarantees the target slot is free.
    pub fn insert_connection(&mut self, connection: Connection) -> Result<(), GraphError> {
        if !self.nodes.contains_key(&connection.source) {
            return Err(GraphError::NodeNotFound(connection.source));
        }
        if !self.nodes.contains_key(&connection.sink) {
            return Err(GraphError::NodeNotFound(connection.sink));
        }
        self.next_connection_id = self.next_connection_id.max(connection.id.0 + 1);
        self.connection_order.push(connection.id);
        self.connections.insert(connection.id, connection);
        Ok(())
    }

    /// Removes a connection, returning it for undo capture.
    pub fn disconnect(&mut self, id: ConnectionId) -> Result<Connection, GraphError> {
        let conn = self
            .connections
            .remove(&id)
            .ok_or(GraphError::ConnectionNotFound(id))?;
        self.connection_order.retain(|c| *c != id);
        Ok(conn)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(&id)
    }

    pub fn connection_mut(&mut self, id: ConnectionId) -> Option<&mut Connection> {
        self.connections.get_mut(&id)
    }

    /// The connection terminating at `(sink, sink_input)`, if any.
    pub fn connection_at(&self, sink: NodeId, sink_input: usize) -> Option<&Connection> {
        self.connection_order
            .iter()
            .filter_map(|id| self.connections.get(id))
            .find(|c| c.sink == sink && c.sink_input == sink_input)
    }

    /// Sink nodes of `id`'s outgoing connections, in connection insertion
    /// order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.connection_order
            .iter()
            .filter_map(|cid| self.connections.get(cid))
            .filter(|c| c.source == id)
            .map(|c| c.sink)
            .collect()
    }

    /// Moves a node, returning its previous position for undo capture.
    pub fn set_position(&mut self, id: NodeId, position: Point) -> Result<Point, GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound(id))?;
        let old = node.position;
        node.position = position;
        Ok(old)
    }

    /// Renames a node, returning its previous name for undo capture.
    pub fn set_name(&mut self, id: NodeId, name: String) -> Result<String, GraphError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound(id))?;
        Ok(std::mem::replace(&mut node.name, name))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.node_order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connection_order
            .iter()
            .filter_map(|id| self.connections.get(id))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn contains_connection(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }
}
