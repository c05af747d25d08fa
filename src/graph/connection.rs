use super::NodeId;
use crate::geometry::{BezierSegment, Orientation, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a connection, allocated by the owning [`Graph`](super::Graph).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Cached render geometry for a connection: the routed bezier plus the
/// tangent angles used to orient arrowhead glyphs at each end.
///
/// Derived data: stale as soon as either endpoint node moves or resizes,
/// until the routing pass refreshes it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConnectionGeometry {
    pub path: BezierSegment,
    pub source_angle: f64,
    pub sink_angle: f64,
}

impl ConnectionGeometry {
    pub fn between(
        source: Point,
        source_orientation: Orientation,
        sink: Point,
        sink_orientation: Orientation,
    ) -> Self {
        let path = BezierSegment::between(source, source_orientation, sink, sink_orientation);
        Self {
            path,
            source_angle: path.start_angle(),
            sink_angle: path.end_angle(),
        }
    }
}

/// A directed edge from one node's output to a specific input slot of
/// another node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: NodeId,
    pub sink: NodeId,
    pub sink_input: usize,
    pub geometry: Option<ConnectionGeometry>,
}

impl Connection {
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.sink == node
    }
}
