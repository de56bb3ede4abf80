//! Subgraph extraction bounded by start and stop nodes

use super::AppGraph;
use crate::error::{GraphError, GraphResult};
use crate::models::NodeId;
use std::collections::{HashSet, VecDeque};

/// Restrict a graph to what is reachable from `start_ids`
///
/// An empty `start_ids` starts from the graph's entry points. Traversal is
/// breadth-first and visits each node once. Stop nodes are kept in the
/// result but their outgoing edges are not followed or retained.
pub fn prune(graph: &AppGraph, start_ids: &[NodeId], stop_ids: &[NodeId]) -> GraphResult<AppGraph> {
    if let Some(unknown) = start_ids
        .iter()
        .chain(stop_ids)
        .find(|id| !graph.contains(id))
    {
        return Err(GraphError::UnknownNode {
            id: unknown.clone(),
        });
    }

    let frontier = if start_ids.is_empty() {
        graph.entry_points()
    } else {
        start_ids.to_vec()
    };
    let stops: HashSet<&NodeId> = stop_ids.iter().collect();

    let mut visited = vec![false; graph.node_count()];
    let mut queue = VecDeque::new();
    for id in &frontier {
        if let Some(idx) = graph.index_of(id) {
            if !visited[idx] {
                visited[idx] = true;
                queue.push_back(idx);
            }
        }
    }

    while let Some(idx) = queue.pop_front() {
        let Some(id) = graph.id_at(idx) else {
            continue;
        };
        if stops.contains(id) {
            tracing::debug!("Stopping traversal at {}", id);
            continue;
        }
        for edge in graph.out_edges(id) {
            if let Some(target) = graph.index_of(&edge.to) {
                if !visited[target] {
                    visited[target] = true;
                    queue.push_back(target);
                }
            }
        }
    }

    // Filter in place so node order and both adjacency orders are unchanged
    let kept = |id: &NodeId| graph.index_of(id).is_some_and(|idx| visited[idx]);
    let pruned = graph.filtered(kept, |edge| !stops.contains(&edge.from));

    tracing::debug!(
        "Pruned graph from {} to {} nodes",
        graph.node_count(),
        pruned.node_count()
    );
    Ok(pruned)
}
