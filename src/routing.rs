//! Connection routing: rebuilds cached bezier geometry from current node
//! bounds and connector orientations.
//!
//! Geometry is derived state. Any mutation that moves an endpoint must be
//! followed by the matching refresh; the [`Document`](crate::document::Document)
//! layer does this automatically for its own operations.

use crate::error::GraphError;
use crate::graph::{ConnectionGeometry, ConnectionId, Graph, NodeId};
use itertools::Itertools;

/// Recomputes the bezier path and endpoint tangent angles for one connection.
pub fn refresh_connection(graph: &mut Graph, id: ConnectionId) -> Result<(), GraphError> {
    let conn = graph
        .connection(id)
        .ok_or(GraphError::ConnectionNotFound(id))?;
    let (source, sink, sink_input) = (conn.source, conn.sink, conn.sink_input);

    let source_node = graph
        .node(source)
        .ok_or(GraphError::NodeNotFound(source))?;
    let source_orientation = source_node
        .output
        .as_ref()
        .map(|o| o.orientation)
        .ok_or(GraphError::MissingOutput(source))?;
    let source_anchor = source_node
        .output_anchor()
        .ok_or(GraphError::MissingOutput(source))?;

    let sink_node = graph.node(sink).ok_or(GraphError::NodeNotFound(sink))?;
    let sink_orientation = sink_node
        .inputs
        .get(sink_input)
        .map(|c| c.orientation)
        .ok_or(GraphError::InputOutOfRange {
            node: sink,
            index: sink_input,
            count: sink_node.inputs.len(),
        })?;
    let sink_anchor = sink_node
        .input_anchor(sink_input)
        .ok_or(GraphError::InputOutOfRange {
            node: sink,
            index: sink_input,
            count: sink_node.inputs.len(),
        })?;

    let geometry = ConnectionGeometry::between(
        source_anchor,
        source_orientation,
        sink_anchor,
        sink_orientation,
    );
    if let Some(conn) = graph.connection_mut(id) {
        conn.geometry = Some(geometry);
    }
    Ok(())
}

/// Refreshes every connection touching `node`, in either direction.
pub fn refresh_node(graph: &mut Graph, node: NodeId) -> Result<(), GraphError> {
    let incident = graph
        .connections()
        .filter(|c| c.touches(node))
        .map(|c| c.id)
        .collect_vec();
    for id in incident {
        refresh_connection(graph, id)?;
    }
    Ok(())
}

/// Refreshes every connection in the graph.
pub fn refresh_all(graph: &mut Graph) -> Result<(), GraphError> {
    let all = graph.connections().map(|c| c.id).collect_vec();
    for id in all {
        refresh_connection(graph, id)?;
    }
    Ok(())
}
