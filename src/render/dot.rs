//! Graphviz DOT rendering

use crate::graph::{Edge, Relation};
use crate::models::{ArgoResourceKind, NodeId};
use crate::pipeline::BuildOutput;
use std::fmt::Write;

/// Render a build as a Graphviz digraph
///
/// In tree mode only parent/child edges are solid; broken edges are drawn
/// dashed red. Dangling targets appear as dotted placeholder nodes.
pub fn render_dot(output: &BuildOutput) -> String {
    let graph = &output.graph;
    let mut out = String::from("digraph apps_of_apps {\n  rankdir=LR;\n  node [fontname=\"Helvetica\"];\n");

    for node in graph.nodes() {
        let shape = match node.kind() {
            ArgoResourceKind::Application => "box",
            ArgoResourceKind::ApplicationSet => "component",
        };
        let _ = writeln!(
            out,
            "  {} [label={}, shape={}];",
            quote(&node.id.to_string()),
            quote(&format!("{}\\n{}", node.display_name, node.id.namespace)),
            shape
        );
    }

    match &output.tree {
        Some(tree) => {
            for (_, parent) in tree.walk() {
                for child in tree.children(parent) {
                    let relation = graph
                        .out_edges(parent)
                        .iter()
                        .find(|e| &e.to == child)
                        .map(|e| e.relation)
                        .unwrap_or(Relation::Deploys);
                    write_edge(&mut out, parent, child, relation, None);
                }
            }
            for broken in tree.broken_edges() {
                write_edge(
                    &mut out,
                    &broken.edge.from,
                    &broken.edge.to,
                    broken.edge.relation,
                    Some("style=dashed, color=red"),
                );
            }
        }
        None => {
            for edge in graph.edges() {
                write_edge(&mut out, &edge.from, &edge.to, edge.relation, None);
            }
        }
    }

    write_dangling(&mut out, graph.dangling_edges());
    out.push_str("}\n");
    out
}

fn write_edge(out: &mut String, from: &NodeId, to: &NodeId, relation: Relation, style: Option<&str>) {
    let label = match relation {
        Relation::Generates => "generates",
        Relation::Deploys => "deploys",
    };
    let extra = style.map(|s| format!(", {}", s)).unwrap_or_default();
    let _ = writeln!(
        out,
        "  {} -> {} [label={}{}];",
        quote(&from.to_string()),
        quote(&to.to_string()),
        quote(label),
        extra
    );
}

fn write_dangling(out: &mut String, edges: &[Edge]) {
    let mut placeholders: Vec<&NodeId> = Vec::new();
    for edge in edges {
        if !placeholders.contains(&&edge.to) {
            placeholders.push(&edge.to);
            let _ = writeln!(
                out,
                "  {} [label={}, shape=box, style=dotted];",
                quote(&edge.to.to_string()),
                quote(&format!("{}\\n(missing)", edge.to.name))
            );
        }
        write_edge(out, &edge.from, &edge.to, edge.relation, Some("style=dashed, color=gray"));
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\\\""))
}
