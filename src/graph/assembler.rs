//! Graph assembly from indexed nodes and resolved edges

use super::{AppGraph, Diagnostic, Diagnostics, Edge, ResourceIndex};

/// Combine nodes and edges into an [`AppGraph`]
///
/// Self-edges are dropped and dangling edges are set aside; both are
/// recorded as diagnostics. The result depends only on the inputs and
/// their order.
pub fn assemble(index: &ResourceIndex, edges: Vec<Edge>, diagnostics: &mut Diagnostics) -> AppGraph {
    let mut graph = AppGraph::new();
    for node in index.all() {
        graph.add_node(node.clone());
    }

    for edge in edges {
        if edge.is_self_edge() {
            diagnostics.push(Diagnostic::SelfEdge {
                node: edge.from,
                relation: edge.relation,
            });
            continue;
        }

        if edge.dangling || !graph.contains(&edge.from) || !graph.contains(&edge.to) {
            let mut dangling = edge.clone();
            dangling.dangling = true;
            diagnostics.push(Diagnostic::DanglingEdge { edge: dangling });
            graph.add_dangling(edge);
            continue;
        }

        graph.add_edge(edge);
    }

    tracing::debug!(
        "Assembled graph: {} nodes, {} edges, {} dangling",
        graph.node_count(),
        graph.edge_count(),
        graph.dangling_edges().len()
    );
    graph
}
