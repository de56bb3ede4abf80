//! Start/stop node selectors
//!
//! Selectors are written `[kind/][namespace/]name`. With two segments the
//! first is a kind when it is a known kind alias, otherwise a namespace.

use super::AppGraph;
use crate::error::{GraphError, GraphResult};
use crate::models::{ArgoResourceKind, NodeId};

/// Parse a selector into a node id
pub fn parse_selector(selector: &str, default_namespace: &str) -> GraphResult<NodeId> {
    let invalid = |reason: &str| GraphError::InvalidSelector {
        selector: selector.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = selector.trim().split('/').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(invalid("empty segment"));
    }

    let (kind, namespace, name) = match parts.as_slice() {
        [name] => (ArgoResourceKind::Application, default_namespace, *name),
        [first, name] => match ArgoResourceKind::from_str_case_insensitive(first) {
            Some(kind) => (kind, default_namespace, *name),
            None => (ArgoResourceKind::Application, *first, *name),
        },
        [kind, namespace, name] => {
            let kind = ArgoResourceKind::from_str_case_insensitive(kind)
                .ok_or_else(|| invalid("unknown kind, expected app or appset"))?;
            (kind, *namespace, *name)
        }
        _ => return Err(invalid("expected [kind/][namespace/]name")),
    };

    Ok(NodeId::new(kind, namespace, name))
}

/// Parse selectors and check that each one names a node of the graph
pub fn resolve_selectors(
    graph: &AppGraph,
    selectors: &[String],
    default_namespace: &str,
) -> GraphResult<Vec<NodeId>> {
    selectors
        .iter()
        .map(|selector| {
            let id = parse_selector(selector, default_namespace)?;
            if graph.contains(&id) {
                Ok(id)
            } else {
                Err(GraphError::UnknownNode { id })
            }
        })
        .collect()
}
