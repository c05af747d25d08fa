//! Tests for the undo/redo command log.
mod common;
use common::{chain_node, leaf_node, root_node};
use trellis::prelude::*;

/// Structural fingerprint of a graph for round-trip comparisons. Sorted, so
/// it compares membership and field values, not insertion order (restored
/// elements re-enter at the end of insertion order).
fn fingerprint(graph: &Graph) -> Vec<String> {
    let mut entries: Vec<String> = graph
        .nodes()
        .map(|n| {
            format!(
                "node {} '{}' ({}, {})",
                n.id, n.name, n.position.x, n.position.y
            )
        })
        .collect();
    entries.extend(
        graph
            .connections()
            .map(|c| format!("conn {} {} -> {}.in{}", c.id, c.source, c.sink, c.sink_input)),
    );
    entries.sort();
    entries
}

#[test]
fn test_add_node_round_trip() {
    let mut document = Document::new();
    let before = fingerprint(document.graph());

    let id = document.add_node(root_node("root", 5.0, 7.0));
    let after = fingerprint(document.graph());

    document.undo().expect("undo");
    assert_eq!(fingerprint(document.graph()), before);
    assert!(document.graph().node(id).is_none());

    document.redo().expect("redo");
    assert_eq!(fingerprint(document.graph()), after);
    let restored = document.graph().node(id).expect("restored node");
    assert_eq!(restored.name, "root");
    assert_eq!(restored.position, Point::new(5.0, 7.0));
}

#[test]
fn test_remove_node_restores_connections() {
    let (mut document, [_, a, ..]) = common::create_small_tree();
    let before = fingerprint(document.graph());

    document.remove_node(a).expect("remove a");
    assert_eq!(document.graph().connection_count(), 1);

    document.undo().expect("undo");
    assert_eq!(fingerprint(document.graph()), before);
    assert_eq!(document.graph().connection_count(), 4);
    // The restored node kept its id and its incident connections.
    assert!(document.graph().node(a).is_some());
    assert_eq!(document.graph().children(a).len(), 2);
}

#[test]
fn test_connect_displacement_round_trip() {
    let mut document = Document::new();
    let a = document.add_node(root_node("a", 0.0, 0.0));
    let b = document.add_node(chain_node("b", 0.0, 100.0));
    let x = document.add_node(leaf_node("x", 300.0, 50.0));

    document.connect(a, x, 0).expect("a -> x");
    let mid = fingerprint(document.graph());
    document.connect(b, x, 0).expect("b -> x displaces a -> x");
    let after = fingerprint(document.graph());

    assert_eq!(document.graph().connection_at(x, 0).map(|c| c.source), Some(b));

    // Undo brings the displaced occupant back.
    document.undo().expect("undo");
    assert_eq!(fingerprint(document.graph()), mid);
    assert_eq!(document.graph().connection_at(x, 0).map(|c| c.source), Some(a));

    document.redo().expect("redo");
    assert_eq!(fingerprint(document.graph()), after);
    assert_eq!(document.graph().connection_at(x, 0).map(|c| c.source), Some(b));
}

#[test]
fn test_disconnect_round_trip() {
    let mut document = Document::new();
    let a = document.add_node(root_node("a", 0.0, 0.0));
    let b = document.add_node(leaf_node("b", 200.0, 0.0));
    let conn = document.connect(a, b, 0).expect("connect");
    let before = fingerprint(document.graph());

    document.disconnect(conn).expect("disconnect");
    assert_eq!(document.graph().connection_count(), 0);

    document.undo().expect("undo");
    assert_eq!(fingerprint(document.graph()), before);
    assert!(document.graph().connection(conn).is_some());
}

#[test]
fn test_move_and_rename_round_trip() {
    let mut document = Document::new();
    let a = document.add_node(root_node("a", 0.0, 0.0));

    document.move_node(a, Point::new(40.0, 60.0)).expect("move");
    document.rename_node(a, "selector").expect("rename");

    document.undo().expect("undo rename");
    assert_eq!(document.graph().node(a).expect("a").name, "a");
    document.undo().expect("undo move");
    assert_eq!(
        document.graph().node(a).expect("a").position,
        Point::new(0.0, 0.0)
    );

    document.redo().expect("redo move");
    document.redo().expect("redo rename");
    let node = document.graph().node(a).expect("a");
    assert_eq!(node.position, Point::new(40.0, 60.0));
    assert_eq!(node.name, "selector");
}

#[test]
fn test_new_command_clears_redo() {
    let mut document = Document::new();
    let a = document.add_node(root_node("a", 0.0, 0.0));
    document.move_node(a, Point::new(10.0, 0.0)).expect("move");
    document.undo().expect("undo");
    assert!(document.can_redo());

    document.move_node(a, Point::new(0.0, 10.0)).expect("new move");
    assert!(!document.can_redo());
}

#[test]
fn test_undo_redo_boundary_errors() {
    let mut graph = Graph::new();
    let mut history = History::new();

    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo(&mut graph), Err(HistoryError::NothingToUndo));
    assert_eq!(history.redo(&mut graph), Err(HistoryError::NothingToRedo));
}

#[test]
fn test_disabled_log_records_nothing() {
    let mut document = Document::new();
    document.history_mut().set_enabled(false);

    let a = document.add_node(root_node("a", 0.0, 0.0));
    let b = document.add_node(leaf_node("b", 200.0, 0.0));
    document.connect(a, b, 0).expect("connect");

    assert!(!document.can_undo());
    // The mutations themselves still happened.
    assert_eq!(document.graph().node_count(), 2);
    assert_eq!(document.graph().connection_count(), 1);

    document.history_mut().set_enabled(true);
    document.move_node(a, Point::new(1.0, 1.0)).expect("move");
    assert!(document.can_undo());
}

#[test]
fn test_undo_is_lifo() {
    let mut document = Document::new();
    let a = document.add_node(root_node("a", 0.0, 0.0));
    document.move_node(a, Point::new(10.0, 0.0)).expect("first");
    document.move_node(a, Point::new(20.0, 0.0)).expect("second");

    document.undo().expect("undo second");
    assert_eq!(
        document.graph().node(a).expect("a").position,
        Point::new(10.0, 0.0)
    );
    document.undo().expect("undo first");
    assert_eq!(
        document.graph().node(a).expect("a").position,
        Point::new(0.0, 0.0)
    );
}

#[test]
fn test_failed_undo_keeps_command_on_stack() {
    // A revert that errors must leave the command where it was, so the
    // caller can repair the graph and retry instead of silently losing the
    // history entry.
    let mut graph = Graph::new();
    let mut history = History::new();
    let ghost = NodeId(999);
    history.record(Command::MoveNode {
        id: ghost,
        from: Point::new(0.0, 0.0),
        to: Point::new(10.0, 10.0),
    });

    assert!(history.undo(&mut graph).is_err());
    assert!(history.can_undo());
    assert!(!history.can_redo());
}

#[test]
fn test_failed_redo_keeps_command_on_stack() {
    let mut graph = Graph::new();
    let mut history = History::new();
    let a = graph.add_node(root_node("a", 0.0, 0.0));
    let from = Point::new(0.0, 0.0);
    let to = Point::new(10.0, 10.0);
    graph.set_position(a, to).expect("move");
    history.record(Command::MoveNode { id: a, from, to });

    history.undo(&mut graph).expect("undo");
    assert!(history.can_redo());

    // The node vanishes out from under the redo stack.
    graph.remove_node(a).expect("remove");
    assert!(history.redo(&mut graph).is_err());
    assert!(history.can_redo());
    assert!(!history.can_undo());
}

#[test]
fn test_commands_capture_reversal_data_eagerly() {
    // A command replays from its captured data even when the graph changed
    // in between (here: the node was renamed after the move was recorded).
    let mut graph = Graph::new();
    let a = graph.add_node(root_node("a", 0.0, 0.0));
    let from = graph.node(a).expect("a").position;
    let to = Point::new(50.0, 50.0);
    graph.set_position(a, to).expect("move");
    let command = Command::MoveNode { id: a, from, to };

    graph.set_name(a, "renamed".to_string()).expect("rename");
    command.revert(&mut graph).expect("revert");
    assert_eq!(graph.node(a).expect("a").position, Point::new(0.0, 0.0));
    assert_eq!(graph.node(a).expect("a").name, "renamed");
}
