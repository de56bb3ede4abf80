//! Plain text rendering

use crate::graph::{BreakReason, Edge, Relation};
use crate::models::NodeId;
use crate::pipeline::BuildOutput;
use std::fmt::Write;

/// Render a build as indented text
///
/// Tree mode prints the forest with two spaces per level; graph mode lists
/// each node followed by its outgoing edges.
pub fn render_text(output: &BuildOutput) -> String {
    let mut out = String::new();
    let graph = &output.graph;

    match &output.tree {
        Some(tree) => {
            for (depth, id) in tree.walk() {
                let _ = writeln!(out, "{}{}", "  ".repeat(depth), node_line(output, id));
            }
            if !tree.broken_edges().is_empty() {
                out.push_str("\nBroken edges:\n");
                for broken in tree.broken_edges() {
                    let reason = match broken.reason {
                        BreakReason::Cycle => "cycle",
                        BreakReason::Revisit => "already placed",
                    };
                    let _ = writeln!(out, "  {} ({})", edge_line(&broken.edge), reason);
                }
            }
        }
        None => {
            for node in graph.nodes() {
                let _ = writeln!(out, "{}", node_line(output, &node.id));
                for edge in graph.out_edges(&node.id) {
                    let _ = writeln!(out, "  {} {}", relation_verb(edge.relation), edge.to);
                }
            }
        }
    }

    if !graph.dangling_edges().is_empty() {
        out.push_str("\nDangling edges:\n");
        for edge in graph.dangling_edges() {
            let _ = writeln!(out, "  {}", edge_line(edge));
        }
    }

    out
}

fn node_line(output: &BuildOutput, id: &NodeId) -> String {
    match output.graph.node(id).and_then(|n| n.source.as_ref()) {
        Some(source) => format!("{}  {}", id, source),
        None => id.to_string(),
    }
}

fn edge_line(edge: &Edge) -> String {
    format!("{} -> {}", edge.from, edge.to)
}

fn relation_verb(relation: Relation) -> &'static str {
    match relation {
        Relation::Generates => "generates",
        Relation::Deploys => "deploys",
    }
}
