use crate::geometry::{Orientation, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a node, allocated by the owning [`Graph`](super::Graph).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// An input slot on a node. Index identity is positional in the node's
/// `inputs` list and stays stable for the node's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConnector {
    pub name: String,
    pub orientation: Orientation,
}

/// The single output connector of a non-root node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConnector {
    pub orientation: Orientation,
}

/// A diagram node: a positioned box with an ordered list of input connectors
/// and at most one output connector. Root nodes have no output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub position: Point,
    pub size: Size,
    pub inputs: Vec<InputConnector>,
    pub output: Option<OutputConnector>,
}

impl Node {
    /// Creates an unattached node. The id is assigned when the node is added
    /// to a graph.
    pub fn new(name: impl Into<String>, position: Point, size: Size) -> Self {
        Self {
            id: NodeId::default(),
            name: name.into(),
            position,
            size,
            inputs: Vec::new(),
            output: None,
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, orientation: Orientation) -> Self {
        self.inputs.push(InputConnector {
            name: name.into(),
            orientation,
        });
        self
    }

    pub fn with_output(mut self, orientation: Orientation) -> Self {
        self.output = Some(OutputConnector { orientation });
        self
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_point_size(self.position, self.size)
    }

    /// Anchor point of the input at `index`, or `None` when out of range.
    ///
    /// Inputs sharing a side are spaced evenly along that edge, in input
    /// order, so anchors keep their place when unrelated inputs change sides.
    pub fn input_anchor(&self, index: usize) -> Option<Point> {
        let connector = self.inputs.get(index)?;
        let siblings = self
            .inputs
            .iter()
            .filter(|c| c.orientation == connector.orientation)
            .count();
        let rank = self
            .inputs
            .iter()
            .take(index)
            .filter(|c| c.orientation == connector.orientation)
            .count();
        let fraction = (rank + 1) as f64 / (siblings + 1) as f64;
        Some(self.edge_anchor(connector.orientation, fraction))
    }

    /// Anchor point of the output connector, centered on its edge.
    pub fn output_anchor(&self) -> Option<Point> {
        let output = self.output.as_ref()?;
        Some(self.edge_anchor(output.orientation, 0.5))
    }

    fn edge_anchor(&self, orientation: Orientation, fraction: f64) -> Point {
        let b = self.bounds();
        match orientation {
            Orientation::Left => Point::new(b.x, b.y + b.height * fraction),
            Orientation::Right => Point::new(b.right(), b.y + b.height * fraction),
            Orientation::Top => Point::new(b.x + b.width * fraction, b.y),
            Orientation::Bottom => Point::new(b.x + b.width * fraction, b.bottom()),
        }
    }
}
