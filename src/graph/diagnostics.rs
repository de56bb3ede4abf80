//! Non-fatal data-quality findings collected during a build

use super::{Edge, Relation};
use crate::models::NodeId;
use serde::Serialize;
use std::fmt;

/// Why an edge was left out of a tree projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreakReason {
    /// Target is an ancestor on the current path
    Cycle,
    /// Target was already placed through an earlier branch
    Revisit,
}

/// A single data-quality finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Diagnostic {
    /// Edge target is not part of the input snapshot
    DanglingEdge { edge: Edge },
    /// A node reported itself as a child and the edge was dropped
    SelfEdge { node: NodeId, relation: Relation },
    /// An Application names more than one ApplicationSet owner
    AmbiguousOwner {
        node: NodeId,
        kept: NodeId,
        ignored: NodeId,
    },
    /// Edge excluded from the tree projection
    BrokenEdge { edge: Edge, reason: BreakReason },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::DanglingEdge { edge } => write!(
                f,
                "{} references {} which is not in the current view",
                edge.from, edge.to
            ),
            Diagnostic::SelfEdge { node, relation } => {
                write!(f, "{} has a {:?} edge to itself, dropped", node, relation)
            }
            Diagnostic::AmbiguousOwner {
                node,
                kept,
                ignored,
            } => write!(
                f,
                "{} has several ApplicationSet owners, keeping {} and ignoring {}",
                node, kept, ignored
            ),
            Diagnostic::BrokenEdge { edge, reason } => match reason {
                BreakReason::Cycle => {
                    write!(f, "Cycle: edge {} -> {} not expanded", edge.from, edge.to)
                }
                BreakReason::Revisit => write!(
                    f,
                    "{} already placed in tree, edge from {} not duplicated",
                    edge.to, edge.from
                ),
            },
        }
    }
}

/// Ordered list of findings, handed back alongside a successful build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::debug!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Human-readable messages for the caller to log
    pub fn messages(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }

    pub fn dangling_count(&self) -> usize {
        self.count(|d| matches!(d, Diagnostic::DanglingEdge { .. }))
    }

    pub fn self_edge_count(&self) -> usize {
        self.count(|d| matches!(d, Diagnostic::SelfEdge { .. }))
    }

    pub fn ambiguous_owner_count(&self) -> usize {
        self.count(|d| matches!(d, Diagnostic::AmbiguousOwner { .. }))
    }

    pub fn broken_edge_count(&self) -> usize {
        self.count(|d| matches!(d, Diagnostic::BrokenEdge { .. }))
    }

    fn count(&self, predicate: impl Fn(&Diagnostic) -> bool) -> usize {
        self.entries.iter().filter(|d| predicate(d)).count()
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        for diagnostic in iter {
            self.push(diagnostic);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_messages() {
        let a = NodeId::application("argocd", "a");
        let b = NodeId::application("argocd", "b");
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::SelfEdge {
            node: a.clone(),
            relation: Relation::Deploys,
        });
        diagnostics.push(Diagnostic::BrokenEdge {
            edge: Edge::deploys(b.clone(), a.clone()),
            reason: BreakReason::Cycle,
        });

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.self_edge_count(), 1);
        assert_eq!(diagnostics.broken_edge_count(), 1);
        assert_eq!(diagnostics.dangling_count(), 0);

        let messages = diagnostics.messages();
        assert_eq!(
            messages[1],
            "Cycle: edge Application/argocd/b -> Application/argocd/a not expanded"
        );
    }
}
