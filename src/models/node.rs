//! Typed node data for the apps-of-apps graph
//!
//! Every Application and ApplicationSet is ingested once into a [`Node`] so
//! the relation code works on a fixed schema instead of probing JSON fields.

use super::ArgoResourceKind;
use serde::{Serialize, Serializer};
use std::fmt;

/// Composite node key
///
/// Field order defines `Ord`: namespace, then name, then kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub namespace: String,
    pub name: String,
    pub kind: ArgoResourceKind,
}

impl NodeId {
    pub fn new(
        kind: ArgoResourceKind,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            kind,
        }
    }

    /// Shorthand for an Application id
    pub fn application(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ArgoResourceKind::Application, namespace, name)
    }

    /// Shorthand for an ApplicationSet id
    pub fn application_set(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ArgoResourceKind::ApplicationSet, namespace, name)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.kind, self.namespace, self.name)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where a node's manifests come from (display only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub repo_url: String,
    /// Directory path, or Helm chart name for chart sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_revision: Option<String>,
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.repo_url)?;
        if let Some(revision) = &self.target_revision {
            write!(f, "@{}", revision)?;
        }
        if let Some(path) = &self.path {
            write!(f, " ({})", path)?;
        }
        Ok(())
    }
}

/// One Application or ApplicationSet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub display_name: String,
    pub source: Option<SourceRef>,
    /// Candidate owning ApplicationSets, in `metadata.ownerReferences` order
    pub owner_refs: Vec<NodeId>,
    /// Applications/ApplicationSets reported in `status.resources`, in report order
    pub managed_refs: Vec<NodeId>,
}

impl Node {
    /// Create a node with no source, owner or managed resources
    pub fn new(id: NodeId) -> Self {
        Self {
            display_name: id.name.clone(),
            id,
            source: None,
            owner_refs: Vec::new(),
            managed_refs: Vec::new(),
        }
    }

    pub fn kind(&self) -> ArgoResourceKind {
        self.id.kind
    }

    pub fn namespace(&self) -> &str {
        &self.id.namespace
    }

    /// First declared owner, the one the resolver prefers
    pub fn owner_ref(&self) -> Option<&NodeId> {
        self.owner_refs.first()
    }

    pub fn with_owner(mut self, owner: NodeId) -> Self {
        self.owner_refs.push(owner);
        self
    }

    pub fn with_managed(mut self, managed: NodeId) -> Self {
        self.managed_refs.push(managed);
        self
    }

    pub fn with_source(mut self, source: SourceRef) -> Self {
        self.source = Some(source);
        self
    }
}
