//! Descriptor extraction for Argo CD resources
//!
//! Turns raw Application/ApplicationSet objects (as returned by the API
//! server or a `kubectl get -o json` dump) into typed [`Node`]s:
//! - owner candidates from `metadata.ownerReferences`
//! - managed Argo CD resources from `status.resources`
//! - display source from `spec.source` / `spec.sources` / `spec.template.spec.source`

use super::{ARGO_API_GROUP, ArgoResourceKind, Node, NodeId, SourceRef};
use crate::error::{GraphError, GraphResult};
use serde_json::Value;

/// Parse one raw resource object into a graph node
///
/// `kind` is supplied by the caller because list items returned by the API
/// server usually omit `kind`. When the object does carry a kind it must match.
pub fn parse_node(kind: ArgoResourceKind, obj: &Value, default_namespace: &str) -> GraphResult<Node> {
    if !obj.is_object() {
        return Err(malformed(kind, "descriptor is not an object"));
    }

    if let Some(declared) = obj.get("kind").and_then(|k| k.as_str()) {
        if declared != kind.as_str() {
            return Err(malformed(
                kind,
                format!("object declares kind '{}'", declared),
            ));
        }
    }

    let metadata = obj.get("metadata");
    let name = metadata
        .and_then(|m| m.get("name"))
        .and_then(|n| n.as_str())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| malformed(kind, "missing metadata.name"))?;
    let namespace = metadata
        .and_then(|m| m.get("namespace"))
        .and_then(|n| n.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or(default_namespace);

    let id = NodeId::new(kind, namespace, name);
    let owner_refs = match kind {
        ArgoResourceKind::Application => extract_owner_refs(obj, namespace),
        ArgoResourceKind::ApplicationSet => Vec::new(),
    };
    let managed_refs = match kind {
        ArgoResourceKind::Application => extract_managed_refs(obj, default_namespace),
        // ApplicationSet status lists its generated Applications, which the
        // owner references already cover
        ArgoResourceKind::ApplicationSet => Vec::new(),
    };

    Ok(Node {
        display_name: name.to_string(),
        source: extract_source_ref(kind, obj),
        id,
        owner_refs,
        managed_refs,
    })
}

fn malformed(kind: ArgoResourceKind, reason: impl Into<String>) -> GraphError {
    GraphError::MalformedDescriptor {
        kind,
        reason: reason.into(),
    }
}

/// Extract ApplicationSet owner candidates from `metadata.ownerReferences`
///
/// Owner references cannot cross namespaces, so the owner lives in the
/// namespace of the owned object.
pub fn extract_owner_refs(obj: &Value, namespace: &str) -> Vec<NodeId> {
    let Some(owner_refs) = obj
        .get("metadata")
        .and_then(|m| m.get("ownerReferences"))
        .and_then(|o| o.as_array())
    else {
        return Vec::new();
    };

    let mut owners: Vec<NodeId> = Vec::new();
    for owner_ref in owner_refs {
        let (Some(kind), Some(name)) = (
            owner_ref.get("kind").and_then(|k| k.as_str()),
            owner_ref.get("name").and_then(|n| n.as_str()),
        ) else {
            tracing::warn!("Skipping incomplete owner reference: {:?}", owner_ref);
            continue;
        };

        if ArgoResourceKind::parse_optional(kind) != Some(ArgoResourceKind::ApplicationSet) {
            continue;
        }
        if !is_argo_api_version(owner_ref.get("apiVersion").and_then(|v| v.as_str())) {
            continue;
        }

        let owner = NodeId::application_set(namespace, name);
        if !owners.contains(&owner) {
            owners.push(owner);
        }
    }
    owners
}

/// Extract Argo CD resources an Application reports in `status.resources`
///
/// Non-Argo kinds are dropped here. An empty namespace means the resource
/// was rendered without one and falls back to `default_namespace`.
pub fn extract_managed_refs(obj: &Value, default_namespace: &str) -> Vec<NodeId> {
    let Some(resources) = obj
        .get("status")
        .and_then(|s| s.get("resources"))
        .and_then(|r| r.as_array())
    else {
        tracing::debug!("No status.resources found on resource");
        return Vec::new();
    };

    let mut managed: Vec<NodeId> = Vec::new();
    for (idx, resource) in resources.iter().enumerate() {
        let Some(kind) = resource
            .get("kind")
            .and_then(|k| k.as_str())
            .and_then(ArgoResourceKind::parse_optional)
        else {
            continue;
        };

        let group = resource.get("group").and_then(|g| g.as_str()).unwrap_or("");
        if !group.is_empty() && group != ARGO_API_GROUP {
            // Same kind name from another API group (e.g. app.k8s.io Application)
            continue;
        }

        let Some(name) = resource
            .get("name")
            .and_then(|n| n.as_str())
            .filter(|n| !n.is_empty())
        else {
            tracing::warn!("Skipping status.resources[{}] without a name", idx);
            continue;
        };

        let namespace = resource
            .get("namespace")
            .and_then(|n| n.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(default_namespace);

        let id = NodeId::new(kind, namespace, name);
        if !managed.contains(&id) {
            managed.push(id);
        }
    }
    managed
}

/// Extract the display source of an Application or ApplicationSet
pub fn extract_source_ref(kind: ArgoResourceKind, obj: &Value) -> Option<SourceRef> {
    let spec = match kind {
        ArgoResourceKind::Application => obj.get("spec")?,
        ArgoResourceKind::ApplicationSet => obj.get("spec")?.get("template")?.get("spec")?,
    };

    let source = spec
        .get("source")
        .filter(|s| s.is_object())
        .or_else(|| spec.get("sources").and_then(|s| s.as_array())?.first())?;

    let repo_url = source.get("repoURL").and_then(|u| u.as_str())?.to_string();
    let path = source
        .get("path")
        .or_else(|| source.get("chart"))
        .and_then(|p| p.as_str())
        .map(str::to_string);
    let target_revision = source
        .get("targetRevision")
        .and_then(|r| r.as_str())
        .map(str::to_string);

    Some(SourceRef {
        repo_url,
        path,
        target_revision,
    })
}

fn is_argo_api_version(api_version: Option<&str>) -> bool {
    match api_version {
        Some(v) => v.split('/').next() == Some(ARGO_API_GROUP),
        // Hand-written fixtures often omit apiVersion
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_node_requires_name() {
        let obj = json!({ "metadata": { "namespace": "argocd" } });
        let err = parse_node(ArgoResourceKind::Application, &obj, "argocd").unwrap_err();
        assert!(matches!(err, GraphError::MalformedDescriptor { .. }));

        let obj = json!("not-an-object");
        assert!(parse_node(ArgoResourceKind::Application, &obj, "argocd").is_err());
    }

    #[test]
    fn test_parse_node_rejects_mismatched_kind() {
        let obj = json!({ "kind": "ApplicationSet", "metadata": { "name": "x" } });
        let err = parse_node(ArgoResourceKind::Application, &obj, "argocd").unwrap_err();
        assert!(err.to_string().contains("ApplicationSet"));
    }

    #[test]
    fn test_parse_node_defaults_namespace() {
        let obj = json!({ "metadata": { "name": "root" } });
        let node = parse_node(ArgoResourceKind::Application, &obj, "gitops").unwrap();
        assert_eq!(node.id, NodeId::application("gitops", "root"));
    }

    #[test]
    fn test_extract_owner_refs_filters_kinds() {
        let obj = json!({
            "metadata": {
                "ownerReferences": [
                    { "apiVersion": "argoproj.io/v1alpha1", "kind": "ApplicationSet", "name": "addons" },
                    { "apiVersion": "v1", "kind": "ConfigMap", "name": "cm" },
                    { "apiVersion": "other.io/v1", "kind": "ApplicationSet", "name": "foreign" },
                    { "kind": "ApplicationSet" }
                ]
            }
        });
        let owners = extract_owner_refs(&obj, "argocd");
        assert_eq!(owners, vec![NodeId::application_set("argocd", "addons")]);
    }

    #[test]
    fn test_extract_managed_refs() {
        let obj = json!({
            "status": {
                "resources": [
                    { "group": "argoproj.io", "kind": "Application", "namespace": "argocd", "name": "child" },
                    { "group": "apps", "kind": "Deployment", "namespace": "web", "name": "api" },
                    { "group": "argoproj.io", "kind": "ApplicationSet", "name": "set" },
                    { "group": "app.k8s.io", "kind": "Application", "namespace": "x", "name": "sig-app" },
                    { "group": "argoproj.io", "kind": "Application", "namespace": "argocd", "name": "child" }
                ]
            }
        });
        let managed = extract_managed_refs(&obj, "argocd");
        assert_eq!(
            managed,
            vec![
                NodeId::application("argocd", "child"),
                NodeId::application_set("argocd", "set"),
            ]
        );
    }

    #[test]
    fn test_extract_source_ref_multi_source() {
        let obj = json!({
            "spec": {
                "sources": [
                    { "repoURL": "https://charts.example.com", "chart": "nginx", "targetRevision": "1.2.3" },
                    { "repoURL": "https://github.com/org/values" }
                ]
            }
        });
        let source = extract_source_ref(ArgoResourceKind::Application, &obj).unwrap();
        assert_eq!(source.repo_url, "https://charts.example.com");
        assert_eq!(source.path.as_deref(), Some("nginx"));
        assert_eq!(source.target_revision.as_deref(), Some("1.2.3"));
    }

    #[test]
    fn test_extract_source_ref_application_set_template() {
        let obj = json!({
            "spec": {
                "template": {
                    "spec": {
                        "source": { "repoURL": "https://github.com/org/gitops", "path": "apps/{{name}}" }
                    }
                }
            }
        });
        let source = extract_source_ref(ArgoResourceKind::ApplicationSet, &obj).unwrap();
        assert_eq!(source.path.as_deref(), Some("apps/{{name}}"));
        assert!(extract_source_ref(ArgoResourceKind::Application, &obj).is_none());
    }
}
