//! Common test utilities for building diagram graphs and documents.
use trellis::prelude::*;

pub const NODE_SIZE: Size = Size {
    width: 100.0,
    height: 40.0,
};

/// A root-style node: output connector only.
#[allow(dead_code)]
pub fn root_node(name: &str, x: f64, y: f64) -> Node {
    Node::new(name, Point::new(x, y), NODE_SIZE).with_output(Orientation::Right)
}

/// A mid-tree node: one input, one output.
#[allow(dead_code)]
pub fn chain_node(name: &str, x: f64, y: f64) -> Node {
    Node::new(name, Point::new(x, y), NODE_SIZE)
        .with_input("in", Orientation::Left)
        .with_output(Orientation::Right)
}

/// A leaf-style node: one input, no output.
#[allow(dead_code)]
pub fn leaf_node(name: &str, x: f64, y: f64) -> Node {
    Node::new(name, Point::new(x, y), NODE_SIZE).with_input("in", Orientation::Left)
}

/// A merge-style node with `inputs` input slots and an output.
#[allow(dead_code)]
pub fn merge_node(name: &str, x: f64, y: f64, inputs: usize) -> Node {
    let mut node = Node::new(name, Point::new(x, y), NODE_SIZE).with_output(Orientation::Right);
    for i in 0..inputs {
        node = node.with_input(format!("in{}", i), Orientation::Left);
    }
    node
}

/// Builds `root -> a`, `root -> b`, `a -> a1`, `a -> a2` in a document.
///
/// Returns `(document, [root, a, b, a1, a2])`.
#[allow(dead_code)]
pub fn create_small_tree() -> (Document, [NodeId; 5]) {
    let mut document = Document::new();
    let root = document.add_node(root_node("root", 0.0, 0.0));
    let a = document.add_node(chain_node("a", 200.0, -60.0));
    let b = document.add_node(chain_node("b", 200.0, 60.0));
    let a1 = document.add_node(leaf_node("a1", 400.0, -90.0));
    let a2 = document.add_node(leaf_node("a2", 400.0, -30.0));
    document.connect(root, a, 0).expect("root -> a");
    document.connect(root, b, 0).expect("root -> b");
    document.connect(a, a1, 0).expect("a -> a1");
    document.connect(a, a2, 0).expect("a -> a2");
    (document, [root, a, b, a1, a2])
}

/// Builds the same tree directly on a bare graph, without history.
#[allow(dead_code)]
pub fn create_small_tree_graph() -> (Graph, [NodeId; 5]) {
    let mut graph = Graph::new();
    let root = graph.add_node(root_node("root", 0.0, 0.0));
    let a = graph.add_node(chain_node("a", 200.0, -60.0));
    let b = graph.add_node(chain_node("b", 200.0, 60.0));
    let a1 = graph.add_node(leaf_node("a1", 400.0, -90.0));
    let a2 = graph.add_node(leaf_node("a2", 400.0, -30.0));
    graph.connect(root, a, 0).expect("root -> a");
    graph.connect(root, b, 0).expect("root -> b");
    graph.connect(a, a1, 0).expect("a -> a1");
    graph.connect(a, a2, 0).expect("a -> a2");
    (graph, [root, a, b, a1, a2])
}

/// Snapshot of every node position, in node insertion order.
#[allow(dead_code)]
pub fn positions(graph: &Graph) -> Vec<(NodeId, Point)> {
    graph.nodes().map(|n| (n.id, n.position)).collect()
}
