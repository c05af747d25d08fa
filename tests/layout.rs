//! Tests for the tree auto-arrange pass.
mod common;
use common::{chain_node, leaf_node, merge_node, root_node, NODE_SIZE};
use trellis::prelude::*;

const EPS: f64 = 1e-9;

fn config(orientation: LayoutOrientation) -> LayoutConfig {
    LayoutConfig {
        orientation,
        level_offset: 50.0,
        node_offset: 10.0,
    }
}

#[test]
fn test_single_child_scenario() {
    // R at (0,0), C at (100,0), equal sizes; connect R -> C.in0 and arrange
    // horizontally with offsets 50/10.
    let mut graph = Graph::new();
    let r = graph.add_node(root_node("R", 0.0, 0.0));
    let c = graph.add_node(leaf_node("C", 100.0, 0.0));
    let (conn, _) = graph.connect(r, c, 0).expect("R -> C");

    arrange(&mut graph, r, &config(LayoutOrientation::Horizontal)).expect("arrange");

    let r_node = graph.node(r).expect("R");
    let c_node = graph.node(c).expect("C");
    assert!((c_node.position.x - (r_node.position.x + NODE_SIZE.width + 50.0)).abs() < EPS);
    // Single child, no vertical spread.
    assert!((c_node.position.y - r_node.position.y).abs() < EPS);

    // Deleting the connection empties the set; the cached geometry goes
    // with the connection.
    graph.disconnect(conn).expect("disconnect");
    assert_eq!(graph.connection_count(), 0);
    assert!(graph.connection(conn).is_none());
}

#[test]
fn test_layout_is_deterministic() {
    let (mut graph, [root, ..]) = common::create_small_tree_graph();
    let cfg = config(LayoutOrientation::Horizontal);

    arrange(&mut graph, root, &cfg).expect("first arrange");
    let first = common::positions(&graph);
    arrange(&mut graph, root, &cfg).expect("second arrange");
    let second = common::positions(&graph);

    assert_eq!(first, second);
}

#[test]
fn test_sibling_spans_do_not_overlap() {
    let mut graph = Graph::new();
    let root = graph.add_node(root_node("root", 0.0, 0.0));
    let c1 = graph.add_node(leaf_node("c1", 0.0, 0.0));
    let c2 = graph.add_node(leaf_node("c2", 0.0, 0.0));
    let c3 = graph.add_node(leaf_node("c3", 0.0, 0.0));
    graph.connect(root, c1, 0).expect("root -> c1");
    graph.connect(root, c2, 0).expect("root -> c2");
    graph.connect(root, c3, 0).expect("root -> c3");

    arrange(&mut graph, root, &config(LayoutOrientation::Horizontal)).expect("arrange");

    // Each sibling span starts at or after the previous span's end plus the
    // node offset.
    let ys: Vec<f64> = [c1, c2, c3]
        .iter()
        .map(|id| graph.node(*id).expect("child").position.y)
        .collect();
    for pair in ys.windows(2) {
        assert!(pair[1] >= pair[0] + NODE_SIZE.height + 10.0 - EPS);
    }
}

#[test]
fn test_parent_centered_on_children_span() {
    let mut graph = Graph::new();
    let root = graph.add_node(root_node("root", 0.0, 0.0));
    let a = graph.add_node(leaf_node("a", 0.0, 0.0));
    let b = graph.add_node(leaf_node("b", 0.0, 0.0));
    graph.connect(root, a, 0).expect("root -> a");
    graph.connect(root, b, 0).expect("root -> b");

    arrange(&mut graph, root, &config(LayoutOrientation::Horizontal)).expect("arrange");

    let root_mid = graph.node(root).expect("root").position.y + NODE_SIZE.height / 2.0;
    let a_y = graph.node(a).expect("a").position.y;
    let b_y = graph.node(b).expect("b").position.y;
    let span_mid = (a_y + b_y + NODE_SIZE.height) / 2.0;
    assert!((root_mid - span_mid).abs() < EPS);
}

#[test]
fn test_vertical_orientation_swaps_axes() {
    let mut graph = Graph::new();
    let root = graph.add_node(root_node("root", 20.0, 30.0));
    let a = graph.add_node(leaf_node("a", 0.0, 0.0));
    let b = graph.add_node(leaf_node("b", 0.0, 0.0));
    graph.connect(root, a, 0).expect("root -> a");
    graph.connect(root, b, 0).expect("root -> b");

    arrange(&mut graph, root, &config(LayoutOrientation::Vertical)).expect("arrange");

    let root_node = graph.node(root).expect("root");
    let a_node = graph.node(a).expect("a");
    let b_node = graph.node(b).expect("b");

    // Root keeps its position; children sit one level below.
    assert!((root_node.position.y - 30.0).abs() < EPS);
    let expected_level = 30.0 + NODE_SIZE.height + 50.0;
    assert!((a_node.position.y - expected_level).abs() < EPS);
    assert!((b_node.position.y - expected_level).abs() < EPS);
    // Siblings spread horizontally.
    assert!((b_node.position.x - (a_node.position.x + NODE_SIZE.width + 10.0)).abs() < EPS);
}

#[test]
fn test_arrange_refreshes_connection_geometry() {
    let (mut graph, [root, a, ..]) = common::create_small_tree_graph();
    arrange(&mut graph, root, &config(LayoutOrientation::Horizontal)).expect("arrange");

    let conn = graph.connection_at(a, 0).expect("root -> a");
    let geometry = conn.geometry.expect("routed geometry");
    let source_anchor = graph
        .node(root)
        .and_then(|n| n.output_anchor())
        .expect("source anchor");
    let sink_anchor = graph
        .node(a)
        .and_then(|n| n.input_anchor(0))
        .expect("sink anchor");
    assert!((geometry.path.p0.x - source_anchor.x).abs() < EPS);
    assert!((geometry.path.p0.y - source_anchor.y).abs() < EPS);
    assert!((geometry.path.p3.x - sink_anchor.x).abs() < EPS);
    assert!((geometry.path.p3.y - sink_anchor.y).abs() < EPS);
}

#[test]
fn test_arrange_rejects_shared_descendants() {
    let mut graph = Graph::new();
    let root = graph.add_node(root_node("root", 0.0, 0.0));
    let a = graph.add_node(chain_node("a", 0.0, 0.0));
    let b = graph.add_node(chain_node("b", 0.0, 0.0));
    let shared = graph.add_node(merge_node("shared", 0.0, 0.0, 2));
    graph.connect(root, a, 0).expect("root -> a");
    graph.connect(root, b, 0).expect("root -> b");
    graph.connect(a, shared, 0).expect("a -> shared");
    graph.connect(b, shared, 1).expect("b -> shared");

    assert_eq!(
        arrange(&mut graph, root, &config(LayoutOrientation::Horizontal)),
        Err(LayoutError::NotATree(shared))
    );
}

#[test]
fn test_arrange_missing_root() {
    let mut graph = Graph::new();
    let ghost = NodeId(42);
    assert_eq!(
        arrange(&mut graph, ghost, &config(LayoutOrientation::Horizontal)),
        Err(LayoutError::NodeNotFound(ghost))
    );
}
