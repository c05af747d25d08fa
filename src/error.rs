use crate::graph::{ConnectionId, NodeId};
use thiserror::Error;

/// Errors that can occur during structural graph mutations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' does not exist in the graph")]
    NodeNotFound(NodeId),

    #[error("Connection '{0}' does not exist in the graph")]
    ConnectionNotFound(ConnectionId),

    #[error("Node '{0}' cannot be connected to itself")]
    SelfConnection(NodeId),

    #[error("Node '{0}' has no output connector and cannot source a connection")]
    MissingOutput(NodeId),

    #[error("Input index {index} is out of range for node '{node}', which has {count} inputs")]
    InputOutOfRange {
        node: NodeId,
        index: usize,
        count: usize,
    },
}

/// Errors that can occur during the tree auto-arrange pass.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Layout root '{0}' does not exist in the graph")]
    NodeNotFound(NodeId),

    #[error("Node '{0}' is reachable more than once; auto-arrange requires a tree")]
    NotATree(NodeId),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors that can occur when replaying the undo/redo command log.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HistoryError {
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors that can occur when encoding, decoding, or pasting a subtree clip.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard payload is not a valid subtree clip: {0}")]
    Malformed(String),

    #[error("Clipboard kind mismatch: expected '{expected}', found '{found}'")]
    KindMismatch { expected: String, found: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors that can occur when saving or loading a document artifact.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Could not read document file '{path}': {message}")]
    FileRead { path: String, message: String },

    #[error("Could not write document file '{path}': {message}")]
    FileWrite { path: String, message: String },

    #[error("Document serialization failed: {0}")]
    Encode(String),

    #[error("Document deserialization failed: {0}")]
    Decode(String),
}
