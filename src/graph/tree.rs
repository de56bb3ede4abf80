//! Projection of a possibly cyclic graph into a rooted forest
//!
//! Depth-first walk with an explicit stack and a three-state marker per
//! node, indexed by the node's arena position in the graph. Edges into an
//! `InProgress` node close a cycle; edges into a `Done` node would place a
//! node twice. Both are kept as broken edges instead of being expanded.

use super::{AppGraph, BreakReason, Diagnostic, Diagnostics, Edge};
use crate::models::NodeId;
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// An edge left out of the forest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenEdge {
    pub edge: Edge,
    pub reason: BreakReason,
}

/// A rooted forest where every placed node appears exactly once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    roots: Vec<NodeId>,
    children: IndexMap<NodeId, Vec<NodeId>>,
    broken_edges: Vec<BrokenEdge>,
}

impl Tree {
    /// Root ids in ascending order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of a node in edge-list order, empty for leaves and unknown ids
    pub fn children(&self, id: &NodeId) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn broken_edges(&self) -> &[BrokenEdge] {
        &self.broken_edges
    }

    /// True when the node sits somewhere in the forest
    pub fn contains(&self, id: &NodeId) -> bool {
        self.children.contains_key(id)
    }

    /// Number of placed nodes
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk of the forest as `(depth, id)` pairs
    pub fn walk(&self) -> Vec<(usize, &NodeId)> {
        let mut out = Vec::with_capacity(self.children.len());
        let mut stack: Vec<(usize, &NodeId)> = self.roots.iter().rev().map(|r| (0, r)).collect();
        while let Some((depth, id)) = stack.pop() {
            out.push((depth, id));
            for child in self.children(id).iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }

    fn place(&mut self, id: &NodeId) {
        self.children.insert(id.clone(), Vec::new());
    }

    fn attach(&mut self, parent: &NodeId, child: &NodeId) {
        if let Some(children) = self.children.get_mut(parent) {
            children.push(child.clone());
        }
        self.place(child);
    }
}

/// Project a graph into a forest
///
/// Roots are the graph's entry points (see [`AppGraph::entry_points`]),
/// processed in ascending id order; out-edges are followed in list order.
/// Always terminates: every node changes state at most twice.
pub fn project(graph: &AppGraph, diagnostics: &mut Diagnostics) -> Tree {
    project_from(graph, &[], diagnostics)
}

/// Project a graph into a forest, rooted at `preferred_roots` first
///
/// Preferred roots are walked in the given order. Entry points then pick up
/// whatever they left unplaced. A preferred root already placed under an
/// earlier one stays a child. Unknown ids are ignored.
pub fn project_from(
    graph: &AppGraph,
    preferred_roots: &[NodeId],
    diagnostics: &mut Diagnostics,
) -> Tree {
    let mut tree = Tree::default();
    let mut state = vec![VisitState::Unvisited; graph.node_count()];

    let roots = preferred_roots.iter().cloned().chain(graph.entry_points());
    for root in roots {
        let Some(root_idx) = graph.index_of(&root) else {
            continue;
        };
        if state[root_idx] != VisitState::Unvisited {
            continue;
        }

        tree.roots.push(root.clone());
        tree.place(&root);
        state[root_idx] = VisitState::InProgress;

        // (arena index, position of the next out-edge to follow)
        let mut stack: Vec<(usize, usize)> = vec![(root_idx, 0)];
        while let Some(&(node_idx, cursor)) = stack.last() {
            let Some(id) = graph.id_at(node_idx) else {
                stack.pop();
                continue;
            };
            let edges = graph.out_edges(id);
            if cursor >= edges.len() {
                state[node_idx] = VisitState::Done;
                stack.pop();
                continue;
            }
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            let edge = &edges[cursor];
            let Some(target_idx) = graph.index_of(&edge.to) else {
                continue;
            };
            match state[target_idx] {
                VisitState::Unvisited => {
                    state[target_idx] = VisitState::InProgress;
                    tree.attach(id, &edge.to);
                    stack.push((target_idx, 0));
                }
                VisitState::InProgress => break_edge(&mut tree, diagnostics, edge, BreakReason::Cycle),
                VisitState::Done => break_edge(&mut tree, diagnostics, edge, BreakReason::Revisit),
            }
        }
    }

    tracing::debug!(
        "Projected tree: {} roots, {} nodes, {} broken edges",
        tree.roots.len(),
        tree.len(),
        tree.broken_edges.len()
    );
    tree
}

fn break_edge(tree: &mut Tree, diagnostics: &mut Diagnostics, edge: &Edge, reason: BreakReason) {
    diagnostics.push(Diagnostic::BrokenEdge {
        edge: edge.clone(),
        reason,
    });
    tree.broken_edges.push(BrokenEdge {
        edge: edge.clone(),
        reason,
    });
}
