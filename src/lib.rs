//! # Trellis - Diagram Graph Core
//!
//! **Trellis** is the UI-independent core of a node-graph diagram editor:
//! a graph model of positioned nodes with typed connectors, bezier
//! connection routing, rubber-band selection, deterministic tree
//! auto-layout, and an undo/redo command log. It contains no rendering and
//! no event loop; a host UI drives it from discrete input events and draws
//! whatever the model says.
//!
//! ## Core Workflow
//!
//! 1.  **Build a model**: create a [`Document`](document::Document) and add
//!     [`Node`](graph::Node)s with input/output connectors.
//! 2.  **Connect**: link one node's output to another node's input slot.
//!     An input slot holds at most one connection; connecting onto an
//!     occupied slot displaces the prior occupant.
//! 3.  **Route**: connection geometry (a cubic bezier plus arrowhead
//!     angles) is cached on each connection and refreshed whenever an
//!     endpoint moves. Document operations do this automatically.
//! 4.  **Arrange**: [`layout::arrange`] positions a tree-shaped subtree
//!     deterministically in a horizontal or vertical orientation.
//! 5.  **Undo/redo**: every document mutation is recorded as a reversible
//!     [`Command`](history::Command); bulk operations (paste, load) run
//!     with the log disabled.
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut document = Document::new();
//!
//!     let root = document.add_node(
//!         Node::new("Sequence", Point::new(0.0, 0.0), Size::new(120.0, 40.0))
//!             .with_output(Orientation::Right),
//!     );
//!     let action = document.add_node(
//!         Node::new("Action", Point::new(300.0, 80.0), Size::new(120.0, 40.0))
//!             .with_input("in", Orientation::Left)
//!             .with_output(Orientation::Right),
//!     );
//!
//!     let edge = document.connect(root, action, 0)?;
//!
//!     // The connection now carries routed geometry.
//!     let path = document
//!         .graph()
//!         .connection(edge)
//!         .and_then(|c| c.geometry)
//!         .map(|g| g.path);
//!     assert!(path.is_some());
//!
//!     // Tidy the tree, then change your mind.
//!     document.arrange(root, &LayoutConfig::default())?;
//!     while document.can_undo() {
//!         document.undo()?;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod clipboard;
pub mod document;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod history;
pub mod layout;
pub mod prelude;
pub mod routing;
pub mod selection;
