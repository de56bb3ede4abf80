//! JSON rendering

use crate::graph::{BrokenEdge, Edge};
use crate::models::{ArgoResourceKind, NodeId, SourceRef};
use crate::pipeline::BuildOutput;
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Document<'a> {
    nodes: Vec<NodeView<'a>>,
    edges: Vec<&'a Edge>,
    dangling_edges: &'a [Edge],
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<TreeView<'a>>,
    diagnostics: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NodeView<'a> {
    id: &'a NodeId,
    kind: ArgoResourceKind,
    namespace: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a SourceRef>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TreeView<'a> {
    roots: &'a [NodeId],
    /// Pre-order listing of every placed node and its children
    children: Vec<TreeEntry<'a>>,
    broken_edges: &'a [BrokenEdge],
}

#[derive(Serialize)]
struct TreeEntry<'a> {
    id: &'a NodeId,
    children: &'a [NodeId],
}

/// Render a build as pretty-printed JSON
pub fn render_json(output: &BuildOutput) -> Result<String> {
    let graph = &output.graph;
    let document = Document {
        nodes: graph
            .nodes()
            .map(|node| NodeView {
                id: &node.id,
                kind: node.kind(),
                namespace: &node.id.namespace,
                name: &node.display_name,
                source: node.source.as_ref(),
            })
            .collect(),
        edges: graph.edges().collect(),
        dangling_edges: graph.dangling_edges(),
        tree: output.tree.as_ref().map(|tree| TreeView {
            roots: tree.roots(),
            children: tree
                .walk()
                .into_iter()
                .map(|(_, id)| TreeEntry {
                    id,
                    children: tree.children(id),
                })
                .collect(),
            broken_edges: tree.broken_edges(),
        }),
        diagnostics: output.diagnostics.messages(),
    };

    serde_json::to_string_pretty(&document).context("Failed to serialize graph to JSON")
}
