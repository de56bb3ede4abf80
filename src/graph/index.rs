//! Name/namespace keyed lookup over the two input collections

use crate::error::{GraphError, GraphResult};
use crate::models::{ArgoResourceKind, Node, NodeId, parse_node};
use indexmap::IndexMap;
use serde_json::Value;

/// Read-only index of Applications and ApplicationSets
///
/// Iteration order is input order: all Applications, then all ApplicationSets.
#[derive(Debug, Clone, Default)]
pub struct ResourceIndex {
    nodes: IndexMap<NodeId, Node>,
}

impl ResourceIndex {
    /// Build the index from raw resource objects
    pub fn build(
        applications: &[Value],
        application_sets: &[Value],
        default_namespace: &str,
    ) -> GraphResult<Self> {
        let applications = applications
            .iter()
            .map(|obj| parse_node(ArgoResourceKind::Application, obj, default_namespace))
            .collect::<GraphResult<Vec<_>>>()?;
        let application_sets = application_sets
            .iter()
            .map(|obj| parse_node(ArgoResourceKind::ApplicationSet, obj, default_namespace))
            .collect::<GraphResult<Vec<_>>>()?;

        Self::from_nodes(applications, application_sets)
    }

    /// Build the index from already typed nodes
    pub fn from_nodes(applications: Vec<Node>, application_sets: Vec<Node>) -> GraphResult<Self> {
        let mut nodes = IndexMap::with_capacity(applications.len() + application_sets.len());

        let collections = [
            (ArgoResourceKind::Application, applications),
            (ArgoResourceKind::ApplicationSet, application_sets),
        ];
        for (kind, collection) in collections {
            for node in collection {
                if node.kind() != kind {
                    return Err(GraphError::MalformedDescriptor {
                        kind,
                        reason: format!("{} found in the {} collection", node.id, kind),
                    });
                }
                if nodes.contains_key(&node.id) {
                    return Err(GraphError::DuplicateId { id: node.id });
                }
                nodes.insert(node.id.clone(), node);
            }
        }

        tracing::debug!("Indexed {} Argo CD resources", nodes.len());
        Ok(Self { nodes })
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in input order
    pub fn all(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn applications(&self) -> impl Iterator<Item = &Node> {
        self.of_kind(ArgoResourceKind::Application)
    }

    pub fn application_sets(&self) -> impl Iterator<Item = &Node> {
        self.of_kind(ArgoResourceKind::ApplicationSet)
    }

    fn of_kind(&self, kind: ArgoResourceKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |node| node.kind() == kind)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_keys_by_namespace_name_kind() {
        let apps = vec![
            json!({ "metadata": { "name": "root", "namespace": "argocd" } }),
            json!({ "metadata": { "name": "root", "namespace": "team-a" } }),
        ];
        let sets = vec![json!({ "metadata": { "name": "root", "namespace": "argocd" } })];

        let index = ResourceIndex::build(&apps, &sets, "argocd").unwrap();
        assert_eq!(index.len(), 3);
        assert!(index.contains(&NodeId::application("team-a", "root")));
        assert!(index.contains(&NodeId::application_set("argocd", "root")));
        assert_eq!(index.applications().count(), 2);
        assert_eq!(index.application_sets().count(), 1);
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let apps = vec![
            json!({ "metadata": { "name": "root", "namespace": "argocd" } }),
            json!({ "metadata": { "name": "root" } }),
        ];
        let err = ResourceIndex::build(&apps, &[], "argocd").unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateId {
                id: NodeId::application("argocd", "root")
            }
        );
    }

    #[test]
    fn test_from_nodes_rejects_wrong_collection() {
        let set = Node::new(NodeId::application_set("argocd", "g"));
        let err = ResourceIndex::from_nodes(vec![set], vec![]).unwrap_err();
        assert!(matches!(err, GraphError::MalformedDescriptor { .. }));
    }

    #[test]
    fn test_all_preserves_input_order() {
        let index = ResourceIndex::from_nodes(
            vec![
                Node::new(NodeId::application("argocd", "z")),
                Node::new(NodeId::application("argocd", "a")),
            ],
            vec![Node::new(NodeId::application_set("argocd", "m"))],
        )
        .unwrap();
        let names: Vec<&str> = index.all().map(|n| n.id.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }
}
