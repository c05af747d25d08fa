//! Undo/redo command log.
//!
//! Every structural mutation is described by a [`Command`] that captures its
//! full reversal data when it is created: a removed node keeps the
//! connections that died with it, a displacing connect keeps the edge it
//! displaced, a property change keeps the old value. Replay never re-reads
//! ambient state, so undo stays correct even after unrelated mutations.

use crate::error::{GraphError, HistoryError};
use crate::geometry::Point;
use crate::graph::{Connection, Graph, Node, NodeId};

/// A reversible structural mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddNode {
        node: Node,
    },
    RemoveNode {
        node: Node,
        /// Connections removed together with the node, for restore.
        connections: Vec<Connection>,
    },
    Connect {
        connection: Connection,
        /// The prior occupant of the target input slot, if one was displaced.
        displaced: Option<Connection>,
    },
    Disconnect {
        connection: Connection,
    },
    MoveNode {
        id: NodeId,
        from: Point,
        to: Point,
    },
    RenameNode {
        id: NodeId,
        from: String,
        to: String,
    },
}

impl Command {
    /// Replays the mutation forward.
    pub fn apply(&self, graph: &mut Graph) -> Result<(), GraphError> {
        match self {
            Command::AddNode { node } => {
                graph.insert_node(node.clone());
                Ok(())
            }
            Command::RemoveNode { node, .. } => graph.remove_node(node.id).map(|_| ()),
            Command::Connect {
                connection,
                displaced,
            } => {
                if let Some(prior) = displaced {
                    graph.disconnect(prior.id)?;
                }
                graph.insert_connection(connection.clone())
            }
            Command::Disconnect { connection } => graph.disconnect(connection.id).map(|_| ()),
            Command::MoveNode { id, to, .. } => graph.set_position(*id, *to).map(|_| ()),
            Command::RenameNode { id, to, .. } => graph.set_name(*id, to.clone()).map(|_| ()),
        }
    }

    /// Replays the mutation in reverse.
    pub fn revert(&self, graph: &mut Graph) -> Result<(), GraphError> {
        match self {
            Command::AddNode { node } => graph.remove_node(node.id).map(|_| ()),
            Command::RemoveNode { node, connections } => {
                graph.insert_node(node.clone());
                for conn in connections {
                    graph.insert_connection(conn.clone())?;
                }
                Ok(())
            }
            Command::Connect {
                connection,
                displaced,
            } => {
                graph.disconnect(connection.id)?;
                if let Some(prior) = displaced {
                    graph.insert_connection(prior.clone())?;
                }
                Ok(())
            }
            Command::Disconnect { connection } => graph.insert_connection(connection.clone()),
            Command::MoveNode { id, from, .. } => graph.set_position(*id, *from).map(|_| ()),
            Command::RenameNode { id, from, .. } => graph.set_name(*id, from.clone()).map(|_| ()),
        }
    }
}

/// Two-stack undo/redo log.
///
/// Recording while the log is disabled is a no-op. Bulk programmatic
/// construction (paste, document load) disables the log so its inner
/// structural calls don't pollute the history.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    enabled: bool,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            enabled: true,
        }
    }

    /// Appends an already-applied command and clears the redo stack.
    /// No-op while the log is disabled.
    pub fn record(&mut self, command: Command) {
        if !self.enabled {
            return;
        }
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Reverts the most recent command and moves it to the redo stack.
    /// A failed revert leaves the command on the undo stack.
    pub fn undo(&mut self, graph: &mut Graph) -> Result<(), HistoryError> {
        let command = self.undo_stack.pop().ok_or(HistoryError::NothingToUndo)?;
        if let Err(e) = command.revert(graph) {
            self.undo_stack.push(command);
            return Err(e.into());
        }
        self.redo_stack.push(command);
        Ok(())
    }

    /// Re-applies the most recently undone command and moves it back to the
    /// undo stack. A failed apply leaves the command on the redo stack.
    pub fn redo(&mut self, graph: &mut Graph) -> Result<(), HistoryError> {
        let command = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        if let Err(e) = command.apply(graph) {
            self.redo_stack.push(command);
            return Err(e.into());
        }
        self.undo_stack.push(command);
        Ok(())
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
