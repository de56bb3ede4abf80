//! End-to-end build tests
//!
//! Raw Argo CD objects in, graph/tree/diagnostics out.

use argo_aoa::error::GraphError;
use argo_aoa::graph::Relation;
use argo_aoa::models::NodeId;
use argo_aoa::pipeline::{BuildOptions, build};
use serde_json::{Value, json};

fn application(namespace: &str, name: &str, owner: Option<&str>, managed: &[(&str, &str)]) -> Value {
    let owner_refs: Vec<Value> = owner
        .into_iter()
        .map(|set| {
            json!({
                "apiVersion": "argoproj.io/v1alpha1",
                "kind": "ApplicationSet",
                "name": set,
            })
        })
        .collect();
    let resources: Vec<Value> = managed
        .iter()
        .map(|(kind, name)| {
            json!({
                "group": "argoproj.io",
                "version": "v1alpha1",
                "kind": kind,
                "namespace": namespace,
                "name": name,
            })
        })
        .collect();

    json!({
        "apiVersion": "argoproj.io/v1alpha1",
        "kind": "Application",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "ownerReferences": owner_refs,
        },
        "status": { "resources": resources }
    })
}

fn application_set(namespace: &str, name: &str) -> Value {
    json!({
        "apiVersion": "argoproj.io/v1alpha1",
        "kind": "ApplicationSet",
        "metadata": { "name": name, "namespace": namespace }
    })
}

/// root deploys the `clusters` ApplicationSet and the `platform` app;
/// clusters generates one app per cluster; platform deploys a missing app
fn fleet() -> (Vec<Value>, Vec<Value>) {
    let applications = vec![
        application(
            "argocd",
            "root",
            None,
            &[("ApplicationSet", "clusters"), ("Application", "platform")],
        ),
        application("argocd", "platform", None, &[("Application", "cert-manager")]),
        application("argocd", "prod-east", Some("clusters"), &[]),
        application("argocd", "prod-west", Some("clusters"), &[]),
    ];
    let application_sets = vec![application_set("argocd", "clusters")];
    (applications, application_sets)
}

fn options() -> BuildOptions {
    BuildOptions::default()
}

#[test]
fn test_graph_mode() {
    let (apps, sets) = fleet();
    let output = build(&apps, &sets, &options()).unwrap();

    assert!(output.tree.is_none());
    assert_eq!(output.graph.node_count(), 5);
    assert_eq!(output.graph.edge_count(), 4);
    assert_eq!(
        output.graph.natural_roots(),
        vec![NodeId::application("argocd", "root")]
    );

    let relations: Vec<Relation> = output.graph.edges().map(|e| e.relation).collect();
    assert_eq!(
        relations
            .iter()
            .filter(|r| **r == Relation::Generates)
            .count(),
        2
    );

    assert_eq!(output.diagnostics.len(), 1);
    assert_eq!(
        output.diagnostics.messages(),
        vec![
            "Application/argocd/platform references Application/argocd/cert-manager which is not in the current view"
                .to_string()
        ]
    );
}

#[test]
fn test_tree_mode() {
    let (apps, sets) = fleet();
    let output = build(
        &apps,
        &sets,
        &BuildOptions {
            tree: true,
            ..options()
        },
    )
    .unwrap();

    let tree = output.tree.unwrap();
    let walked: Vec<(usize, String)> = tree
        .walk()
        .into_iter()
        .map(|(depth, id)| (depth, id.name.clone()))
        .collect();
    assert_eq!(
        walked,
        vec![
            (0, "root".to_string()),
            (1, "clusters".to_string()),
            (2, "prod-east".to_string()),
            (2, "prod-west".to_string()),
            (1, "platform".to_string()),
        ]
    );
    assert!(tree.broken_edges().is_empty());
}

#[test]
fn test_start_and_stop_selectors() {
    let (apps, sets) = fleet();
    let output = build(
        &apps,
        &sets,
        &BuildOptions {
            start: vec!["root".to_string()],
            stop: vec!["appset/clusters".to_string()],
            ..options()
        },
    )
    .unwrap();

    let names: Vec<&str> = output
        .graph
        .nodes()
        .map(|n| n.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["root", "platform", "clusters"]);
    assert!(
        output
            .graph
            .out_edges(&NodeId::application_set("argocd", "clusters"))
            .is_empty()
    );
    // platform is still expanded, so its dangling reference survives
    assert_eq!(output.graph.dangling_edges().len(), 1);
}

#[test]
fn test_start_from_subtree_in_other_namespace() {
    let apps = vec![
        application("team-a", "team-root", None, &[("Application", "svc")]),
        application("team-a", "svc", None, &[]),
        application("argocd", "svc", None, &[]),
    ];
    let output = build(
        &apps,
        &[],
        &BuildOptions {
            start: vec!["team-a/team-root".to_string()],
            ..options()
        },
    )
    .unwrap();

    assert_eq!(output.graph.node_count(), 2);
    assert!(output.graph.contains(&NodeId::application("team-a", "svc")));
    assert!(!output.graph.contains(&NodeId::application("argocd", "svc")));
}

#[test]
fn test_start_node_roots_tree_on_cycle() {
    let apps = vec![
        application("argocd", "a", None, &[("Application", "b")]),
        application("argocd", "b", None, &[("Application", "c")]),
        application("argocd", "c", None, &[("Application", "a")]),
    ];
    let output = build(
        &apps,
        &[],
        &BuildOptions {
            start: vec!["b".to_string()],
            tree: true,
            ..options()
        },
    )
    .unwrap();

    let tree = output.tree.unwrap();
    assert_eq!(tree.roots(), &[NodeId::application("argocd", "b")]);
    assert_eq!(
        tree.children(&NodeId::application("argocd", "b")),
        &[NodeId::application("argocd", "c")]
    );
    assert_eq!(tree.broken_edges().len(), 1);
    let broken = &tree.broken_edges()[0].edge;
    assert_eq!(broken.from, NodeId::application("argocd", "a"));
    assert_eq!(broken.to, NodeId::application("argocd", "b"));
}

#[test]
fn test_start_nodes_root_tree_in_given_order() {
    let (apps, sets) = fleet();
    let output = build(
        &apps,
        &sets,
        &BuildOptions {
            start: vec!["platform".to_string(), "appset/clusters".to_string()],
            tree: true,
            ..options()
        },
    )
    .unwrap();

    let tree = output.tree.unwrap();
    assert_eq!(
        tree.roots(),
        &[
            NodeId::application("argocd", "platform"),
            NodeId::application_set("argocd", "clusters"),
        ]
    );
    assert!(!tree.contains(&NodeId::application("argocd", "root")));
}

#[test]
fn test_unknown_start_node() {
    let (apps, sets) = fleet();
    let err = build(
        &apps,
        &sets,
        &BuildOptions {
            start: vec!["does-not-exist".to_string()],
            ..options()
        },
    )
    .unwrap_err();

    assert_eq!(
        err,
        GraphError::UnknownNode {
            id: NodeId::application("argocd", "does-not-exist")
        }
    );
    assert!(!err.is_validation());
    assert_eq!(err.to_string(), "Unknown node: Application/argocd/does-not-exist");
}

#[test]
fn test_invalid_selector() {
    let (apps, sets) = fleet();
    let err = build(
        &apps,
        &sets,
        &BuildOptions {
            stop: vec!["a/b/c/d".to_string()],
            ..options()
        },
    )
    .unwrap_err();

    assert!(matches!(err, GraphError::InvalidSelector { .. }));
    assert!(err.is_validation());
}

#[test]
fn test_duplicate_application() {
    let apps = vec![
        application("argocd", "root", None, &[]),
        application("argocd", "root", None, &[]),
    ];
    let err = build(&apps, &[], &options()).unwrap_err();

    assert_eq!(
        err.node_id(),
        Some(&NodeId::application("argocd", "root"))
    );
    assert_eq!(err.to_string(), "Duplicate resource id: Application/argocd/root");
}

#[test]
fn test_same_name_different_kind_is_not_duplicate() {
    let apps = vec![application("argocd", "guestbook", Some("guestbook"), &[])];
    let sets = vec![application_set("argocd", "guestbook")];
    let output = build(&apps, &sets, &options()).unwrap();

    assert_eq!(output.graph.node_count(), 2);
    assert_eq!(output.graph.edge_count(), 1);
}

#[test]
fn test_empty_snapshot() {
    let output = build(
        &[],
        &[],
        &BuildOptions {
            tree: true,
            ..options()
        },
    )
    .unwrap();

    assert!(output.graph.is_empty());
    assert!(output.tree.unwrap().is_empty());
    assert!(output.diagnostics.is_empty());
}

#[test]
fn test_build_is_repeatable() {
    let (apps, sets) = fleet();
    let opts = BuildOptions {
        tree: true,
        ..options()
    };
    let first = build(&apps, &sets, &opts).unwrap();
    let second = build(&apps, &sets, &opts).unwrap();

    assert_eq!(first.graph, second.graph);
    assert_eq!(first.diagnostics, second.diagnostics);
}
