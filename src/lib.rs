//! Argo CD apps-of-apps library
//!
//! This library builds the apps-of-apps graph (and its tree projection)
//! from Argo CD Applications and ApplicationSets. It backs the `argo-aoa`
//! binary and can be used directly for testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod kube;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod source;

// Re-export commonly used types for convenience
pub use error::{GraphError, GraphResult};
pub use graph::{AppGraph, Diagnostic, Diagnostics, Edge, Relation, Tree};
pub use models::{ArgoResourceKind, Node, NodeId, SourceRef};
pub use pipeline::{BuildOptions, BuildOutput, DEFAULT_NAMESPACE, build};
pub use render::OutputFormat;
pub use source::{FileSource, ResourceSource, Snapshot, collect};
