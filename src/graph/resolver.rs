//! Relationship inference between Applications and ApplicationSets
//!
//! Two relations are derived from the typed node fields:
//! - `Generates`: ApplicationSet -> Application, from owner references
//! - `Deploys`: Application -> Application/ApplicationSet, from `status.resources`
//!
//! Emission order is deterministic: all `Generates` edges in ApplicationSet
//! order (then Application order), followed by `Deploys` edges in input order
//! and `managed_refs` order.

use super::{Diagnostic, Diagnostics, Edge, ResourceIndex};
use crate::models::NodeId;
use std::collections::HashMap;

/// Emit every relation edge for the indexed resources
///
/// References to resources absent from the index come back as edges with
/// `dangling` set; they are never dropped here.
pub fn resolve(index: &ResourceIndex, diagnostics: &mut Diagnostics) -> Vec<Edge> {
    let mut edges = resolve_generated(index, diagnostics);
    edges.extend(resolve_deployed(index));

    tracing::debug!(
        "Resolved {} edges ({} dangling)",
        edges.len(),
        edges.iter().filter(|e| e.dangling).count()
    );
    edges
}

/// `Generates` edges from owner references
///
/// An Application claimed by more than one ApplicationSet keeps the first
/// claim in index order; later claims become diagnostics.
fn resolve_generated(index: &ResourceIndex, diagnostics: &mut Diagnostics) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut claimed: HashMap<&NodeId, &NodeId> = HashMap::new();

    for set in index.application_sets() {
        for app in index.applications() {
            if !app.owner_refs.contains(&set.id) {
                continue;
            }
            if let Some(kept) = claimed.get(&app.id) {
                diagnostics.push(Diagnostic::AmbiguousOwner {
                    node: app.id.clone(),
                    kept: (*kept).clone(),
                    ignored: set.id.clone(),
                });
                continue;
            }
            claimed.insert(&app.id, &set.id);
            edges.push(Edge::generates(set.id.clone(), app.id.clone()));
        }
    }

    edges
}

/// `Deploys` edges from reported managed resources
fn resolve_deployed(index: &ResourceIndex) -> Vec<Edge> {
    let mut edges = Vec::new();

    for node in index.all() {
        for target in &node.managed_refs {
            let mut edge = Edge::deploys(node.id.clone(), target.clone());
            edge.dangling = !index.contains(target);
            edges.push(edge);
        }
    }

    edges
}
