//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the trellis crate. Import
//! this module to get access to the core functionality without having to
//! import each type individually.
//!
//! # Example
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut document = Document::new();
//! let root = document.add_node(
//!     Node::new("Root", Point::new(0.0, 0.0), Size::new(120.0, 40.0)).with_output(Orientation::Right),
//! );
//! let child = document.add_node(
//!     Node::new("Child", Point::new(200.0, 0.0), Size::new(120.0, 40.0))
//!         .with_input("in", Orientation::Left),
//! );
//! document.connect(root, child, 0)?;
//! document.arrange(root, &LayoutConfig::default())?;
//! # Ok(())
//! # }
//! ```

// Model and orchestration
pub use crate::document::Document;
pub use crate::graph::{
    Connection, ConnectionGeometry, ConnectionId, Graph, InputConnector, Node, NodeId,
    OutputConnector,
};

// Geometry
pub use crate::geometry::{BezierSegment, Orientation, Point, Rect, Size};

// Routing, layout, selection, history
pub use crate::history::{Command, History};
pub use crate::layout::{LayoutConfig, LayoutOrientation, arrange};
pub use crate::routing::{refresh_all, refresh_connection, refresh_node};
pub use crate::selection::{ElementId, SelectionSet};

// Clipboard
pub use crate::clipboard::{SubtreeClip, copy_subtree, paste};

// Error types
pub use crate::error::{ClipboardError, DocumentError, GraphError, HistoryError, LayoutError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
