//! Graph data structures for apps-of-apps relationships
//!
//! Nodes are kept in insertion order with adjacency lists in both
//! directions. The position of a node in `nodes` doubles as its arena
//! index for traversal state.

use crate::models::{Node, NodeId};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::VecDeque;

/// Type of relationship between nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Relation {
    /// ApplicationSet generated an Application (owner reference)
    Generates,
    /// Application deployed another Application or ApplicationSet (status.resources)
    Deploys,
}

/// A directed relation between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub relation: Relation,
    /// Target is missing from the input snapshot
    pub dangling: bool,
}

impl Edge {
    pub fn new(from: NodeId, to: NodeId, relation: Relation) -> Self {
        Self {
            from,
            to,
            relation,
            dangling: false,
        }
    }

    pub fn generates(from: NodeId, to: NodeId) -> Self {
        Self::new(from, to, Relation::Generates)
    }

    pub fn deploys(from: NodeId, to: NodeId) -> Self {
        Self::new(from, to, Relation::Deploys)
    }

    pub fn is_self_edge(&self) -> bool {
        self.from == self.to
    }
}

/// The directed apps-of-apps graph
///
/// Every node has an entry in both adjacency maps, possibly empty.
/// Dangling edges are held apart and never traversed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppGraph {
    nodes: IndexMap<NodeId, Node>,
    out_edges: IndexMap<NodeId, Vec<Edge>>,
    in_edges: IndexMap<NodeId, Vec<Edge>>,
    dangling: Vec<Edge>,
}

impl AppGraph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with empty adjacency lists
    pub fn add_node(&mut self, node: Node) {
        let id = node.id.clone();
        self.out_edges.entry(id.clone()).or_default();
        self.in_edges.entry(id.clone()).or_default();
        self.nodes.insert(id, node);
    }

    /// Add an edge between two existing nodes
    ///
    /// Returns false and leaves the graph untouched when either endpoint is
    /// unknown or the edge is marked dangling.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        if edge.dangling || !self.contains(&edge.from) || !self.contains(&edge.to) {
            return false;
        }
        if let Some(incoming) = self.in_edges.get_mut(&edge.to) {
            incoming.push(edge.clone());
        }
        if let Some(outgoing) = self.out_edges.get_mut(&edge.from) {
            outgoing.push(edge);
        }
        true
    }

    /// Record an edge whose target is not part of the snapshot
    pub fn add_dangling(&mut self, mut edge: Edge) {
        edge.dangling = true;
        self.dangling.push(edge);
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Arena index of a node
    pub fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.nodes.get_index_of(id)
    }

    /// Node id at an arena index
    pub fn id_at(&self, index: usize) -> Option<&NodeId> {
        self.nodes.get_index(index).map(|(id, _)| id)
    }

    /// Outgoing edges of a node, empty for unknown ids
    pub fn out_edges(&self, id: &NodeId) -> &[Edge] {
        self.out_edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Incoming edges of a node, empty for unknown ids
    pub fn in_edges(&self, id: &NodeId) -> &[Edge] {
        self.in_edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All traversable edges, grouped by source node in node order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.out_edges.values().flatten()
    }

    pub fn edge_count(&self) -> usize {
        self.out_edges.values().map(Vec::len).sum()
    }

    /// Edges whose target was not in the input snapshot
    pub fn dangling_edges(&self) -> &[Edge] {
        &self.dangling
    }

    /// Copy restricted to the kept nodes and edges
    ///
    /// Edges are kept only when both endpoints are kept; dangling edges
    /// need only their source. Node order and the order of every adjacency
    /// list are unchanged.
    pub fn filtered(
        &self,
        keep_node: impl Fn(&NodeId) -> bool,
        keep_edge: impl Fn(&Edge) -> bool,
    ) -> AppGraph {
        let nodes: IndexMap<NodeId, Node> = self
            .nodes
            .iter()
            .filter(|(id, _)| keep_node(*id))
            .map(|(id, node)| (id.clone(), node.clone()))
            .collect();

        let keep = |edge: &Edge| {
            nodes.contains_key(&edge.from) && nodes.contains_key(&edge.to) && keep_edge(edge)
        };
        let out_edges = filter_adjacency(&self.out_edges, &nodes, &keep);
        let in_edges = filter_adjacency(&self.in_edges, &nodes, &keep);
        let dangling = self
            .dangling
            .iter()
            .filter(|edge| nodes.contains_key(&edge.from) && keep_edge(*edge))
            .cloned()
            .collect();

        AppGraph {
            nodes,
            out_edges,
            in_edges,
            dangling,
        }
    }

    /// Nodes without incoming edges, in ascending id order
    ///
    /// Nodes on root-less cycles are not reachable from these, so this is not
    /// a complete start set; use [`AppGraph::entry_points`] to reach every node.
    pub fn natural_roots(&self) -> Vec<NodeId> {
        let mut roots: Vec<NodeId> = self
            .nodes
            .keys()
            .filter(|id| self.in_edges(id).is_empty())
            .cloned()
            .collect();
        roots.sort();
        roots
    }

    /// Entry points that reach every node, in ascending id order
    ///
    /// Natural roots first cover what they can reach. Nodes left over sit in
    /// root-less cycles; the smallest unreached id becomes an extra entry
    /// point until nothing is left.
    pub fn entry_points(&self) -> Vec<NodeId> {
        let mut entries = self.natural_roots();
        let mut reached = vec![false; self.nodes.len()];
        for root in &entries {
            self.mark_reachable(root, &mut reached);
        }

        let mut unreached: Vec<&NodeId> = self
            .nodes
            .keys()
            .enumerate()
            .filter(|(idx, _)| !reached[*idx])
            .map(|(_, id)| id)
            .collect();
        unreached.sort();

        for id in unreached {
            let Some(idx) = self.index_of(id) else {
                continue;
            };
            if !reached[idx] {
                self.mark_reachable(id, &mut reached);
                entries.push(id.clone());
            }
        }

        entries.sort();
        entries
    }

    fn mark_reachable(&self, start: &NodeId, reached: &mut [bool]) {
        let Some(start_idx) = self.index_of(start) else {
            return;
        };
        reached[start_idx] = true;
        let mut queue = VecDeque::from([start_idx]);
        while let Some(idx) = queue.pop_front() {
            let Some(id) = self.id_at(idx) else {
                continue;
            };
            for edge in self.out_edges(id) {
                if let Some(target) = self.index_of(&edge.to) {
                    if !reached[target] {
                        reached[target] = true;
                        queue.push_back(target);
                    }
                }
            }
        }
    }
}

fn filter_adjacency(
    adjacency: &IndexMap<NodeId, Vec<Edge>>,
    nodes: &IndexMap<NodeId, Node>,
    keep: &impl Fn(&Edge) -> bool,
) -> IndexMap<NodeId, Vec<Edge>> {
    adjacency
        .iter()
        .filter(|(id, _)| nodes.contains_key(*id))
        .map(|(id, edges)| (id.clone(), edges.iter().filter(|e| keep(*e)).cloned().collect()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(name: &str) -> NodeId {
        NodeId::application("argocd", name)
    }

    fn graph_of(names: &[&str], edges: &[(&str, &str)]) -> AppGraph {
        let mut graph = AppGraph::new();
        for name in names {
            graph.add_node(Node::new(app(name)));
        }
        for (from, to) in edges {
            graph.add_edge(Edge::deploys(app(from), app(to)));
        }
        graph
    }

    #[test]
    fn test_add_node_creates_adjacency_entries() {
        let graph = graph_of(&["a"], &[]);
        assert!(graph.out_edges(&app("a")).is_empty());
        assert!(graph.in_edges(&app("a")).is_empty());
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_add_edge_keeps_both_directions() {
        let graph = graph_of(&["a", "b"], &[("a", "b")]);
        assert_eq!(graph.out_edges(&app("a"))[0].to, app("b"));
        assert_eq!(graph.in_edges(&app("b"))[0].from, app("a"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_add_edge_rejects_unknown_endpoint() {
        let mut graph = graph_of(&["a"], &[]);
        assert!(!graph.add_edge(Edge::deploys(app("a"), app("ghost"))));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_natural_roots_sorted() {
        let graph = graph_of(&["c", "b", "a"], &[("c", "a")]);
        assert_eq!(graph.natural_roots(), vec![app("b"), app("c")]);
    }

    #[test]
    fn test_entry_points_cover_rootless_cycles() {
        // r -> x, plus a separate cycle p <-> q
        let graph = graph_of(&["r", "x", "q", "p"], &[("r", "x"), ("p", "q"), ("q", "p")]);
        assert_eq!(graph.entry_points(), vec![app("p"), app("r")]);
    }

    #[test]
    fn test_entry_points_pick_one_per_cycle_chain() {
        // x <-> y, y -> w, w <-> z: one entry point reaches all four
        let graph = graph_of(
            &["z", "w", "y", "x"],
            &[("x", "y"), ("y", "x"), ("y", "w"), ("w", "z"), ("z", "w")],
        );
        // w is the smallest unreached id; it cannot reach x, so x is added as well
        assert_eq!(graph.entry_points(), vec![app("w"), app("x")]);
    }
}
