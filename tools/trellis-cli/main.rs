use clap::{Parser, ValueEnum};
use itertools::Itertools;
use serde::Deserialize;
use std::fs;
use std::time::Instant;
use trellis::prelude::*;

// --- JSON Deserialization Structs (Input Format Specific) ---
// These structs match the diagram JSON format and are only used here for
// conversion into the canonical graph model.

#[derive(Deserialize)]
struct RawDiagram {
    nodes: Vec<RawNode>,
    #[serde(default)]
    connections: Vec<RawConnection>,
}

#[derive(Deserialize)]
struct RawNode {
    name: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    inputs: Vec<String>,
    #[serde(default)]
    output: bool,
}

#[derive(Deserialize)]
struct RawConnection {
    /// Index of the source node in the `nodes` array.
    source: usize,
    /// Index of the sink node in the `nodes` array.
    sink: usize,
    #[serde(default)]
    sink_input: usize,
}

/// CLI-facing orientation enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OrientationCli {
    Horizontal,
    Vertical,
}

/// Diagram graph layout CLI: loads a diagram JSON, auto-arranges the tree
/// under a root node, and prints the resulting positions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the diagram JSON file
    diagram_path: String,

    /// Index of the root node to arrange from
    #[arg(short, long, default_value_t = 0)]
    root: usize,

    /// Layout orientation
    #[arg(short, long, value_enum, default_value_t = OrientationCli::Horizontal)]
    orientation: OrientationCli,

    /// Gap between tree levels
    #[arg(long, default_value_t = 50.0)]
    level_offset: f64,

    /// Gap between sibling subtrees
    #[arg(long, default_value_t = 10.0)]
    node_offset: f64,

    /// Emit the arranged graph as JSON instead of a position listing
    #[arg(short, long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let diagram_json = fs::read_to_string(&cli.diagram_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read diagram file '{}': {}",
            &cli.diagram_path, e
        ))
    });
    let raw: RawDiagram = serde_json::from_str(&diagram_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse diagram JSON: {}", e)));

    let (mut graph, ids) = build_graph(raw);
    let root = ids
        .get(cli.root)
        .copied()
        .unwrap_or_else(|| exit_with_error(&format!("Root index {} out of range", cli.root)));

    let config = LayoutConfig {
        orientation: match cli.orientation {
            OrientationCli::Horizontal => LayoutOrientation::Horizontal,
            OrientationCli::Vertical => LayoutOrientation::Vertical,
        },
        level_offset: cli.level_offset,
        node_offset: cli.node_offset,
    };

    let arrange_start = Instant::now();
    let arranged = arrange(&mut graph, root, &config)
        .unwrap_or_else(|e| exit_with_error(&format!("Layout failed: {}", e)));
    let arrange_duration = arrange_start.elapsed();

    if cli.json {
        let serialized = serde_json::to_string_pretty(&graph)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));
        println!("{}", serialized);
        return;
    }

    let listing = arranged
        .iter()
        .filter_map(|id| graph.node(*id))
        .map(|n| format!("{}: ({}, {})", n.name, n.position.x, n.position.y))
        .join("\n");
    println!("{}", listing);
    eprintln!(
        "\nArranged {} nodes in {:?}",
        arranged.len(),
        arrange_duration
    );
}

/// Converts the raw JSON model into the canonical graph, returning node ids
/// in input order so connection indices can be resolved.
fn build_graph(raw: RawDiagram) -> (Graph, Vec<NodeId>) {
    let mut graph = Graph::new();
    let mut ids = Vec::with_capacity(raw.nodes.len());

    for raw_node in raw.nodes {
        let mut node = Node::new(
            raw_node.name,
            Point::new(raw_node.x, raw_node.y),
            Size::new(raw_node.width, raw_node.height),
        );
        for input in raw_node.inputs {
            node = node.with_input(input, Orientation::Left);
        }
        if raw_node.output {
            node = node.with_output(Orientation::Right);
        }
        ids.push(graph.add_node(node));
    }

    for conn in raw.connections {
        let (Some(&source), Some(&sink)) = (ids.get(conn.source), ids.get(conn.sink)) else {
            exit_with_error(&format!(
                "Connection references node index {} outside the diagram",
                conn.source.max(conn.sink)
            ));
        };
        if let Err(e) = graph.connect(source, sink, conn.sink_input) {
            exit_with_error(&format!("Invalid connection: {}", e));
        }
    }

    (graph, ids)
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
