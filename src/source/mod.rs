//! Resource retrieval
//!
//! A [`ResourceSource`] delivers one snapshot of raw Applications and
//! ApplicationSets. Retrieval is the only async part of a run; the graph
//! build itself is synchronous.

mod file;

pub use file::FileSource;

use crate::models::ArgoResourceKind;
use crate::pipeline::{self, BuildOptions, BuildOutput};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Raw resource lists for one build
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub applications: Vec<Value>,
    pub application_sets: Vec<Value>,
}

impl Snapshot {
    /// Split a mixed list of objects by their `kind` field
    ///
    /// Objects of other kinds are skipped.
    pub fn from_items(items: Vec<Value>) -> Self {
        let mut snapshot = Snapshot::default();
        for item in items {
            match item
                .get("kind")
                .and_then(|k| k.as_str())
                .and_then(ArgoResourceKind::parse_optional)
            {
                Some(ArgoResourceKind::Application) => snapshot.applications.push(item),
                Some(ArgoResourceKind::ApplicationSet) => snapshot.application_sets.push(item),
                None => {
                    tracing::debug!(
                        "Skipping non Argo CD object of kind {:?}",
                        item.get("kind")
                    );
                }
            }
        }
        snapshot
    }

    pub fn len(&self) -> usize {
        self.applications.len() + self.application_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Source of Argo CD resource lists
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Fetch Applications and ApplicationSets; `None` means all namespaces
    async fn fetch(&self, namespace: Option<String>) -> Result<Snapshot>;

    /// Get source type name
    fn source_type(&self) -> &'static str;
}

/// Fetch a snapshot and build the apps-of-apps view from it
pub async fn collect(
    source: &dyn ResourceSource,
    namespace: Option<String>,
    options: &BuildOptions,
) -> Result<BuildOutput> {
    tracing::debug!(
        "Fetching Argo CD resources from {} source (namespace: {:?})",
        source.source_type(),
        namespace
    );
    let snapshot = source
        .fetch(namespace)
        .await
        .with_context(|| format!("Failed to fetch resources from {}", source.source_type()))?;

    tracing::debug!(
        "Fetched {} Applications and {} ApplicationSets",
        snapshot.applications.len(),
        snapshot.application_sets.len()
    );

    let output = pipeline::build(&snapshot.applications, &snapshot.application_sets, options)?;
    Ok(output)
}
