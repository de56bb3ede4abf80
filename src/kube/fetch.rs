//! Listing Argo CD resources from the Kubernetes API

use crate::models::{ARGO_API_GROUP, ARGO_API_VERSION, ArgoResourceKind};
use crate::source::{ResourceSource, Snapshot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use kube::Api;
use kube::api::{ApiResource, DynamicObject, ListParams};
use serde_json::Value;

/// Build the dynamic API resource for an Argo CD kind
pub fn api_resource(kind: ArgoResourceKind) -> ApiResource {
    ApiResource {
        group: ARGO_API_GROUP.to_string(),
        version: ARGO_API_VERSION.to_string(),
        api_version: format!("{}/{}", ARGO_API_GROUP, ARGO_API_VERSION),
        kind: kind.as_str().to_string(),
        plural: kind.plural().to_string(),
    }
}

/// Resource source backed by a live cluster
pub struct KubeSource {
    client: kube::Client,
}

impl KubeSource {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    /// List every object of one kind as JSON
    async fn list(&self, kind: ArgoResourceKind, namespace: Option<&str>) -> Result<Vec<Value>> {
        let api_resource = api_resource(kind);
        let api: Api<DynamicObject> = match namespace {
            Some(ns) => Api::namespaced_with(self.client.clone(), ns, &api_resource),
            None => Api::all_with(self.client.clone(), &api_resource),
        };

        let list = match api.list(&ListParams::default()).await {
            Ok(list) => list,
            Err(e) => {
                let error_string = format!("{}", e);
                // ApplicationSet CRD is optional in older Argo CD installs
                if kind == ArgoResourceKind::ApplicationSet
                    && (error_string.contains("404") || error_string.contains("NotFound"))
                {
                    tracing::warn!("{} API not available: {}", kind, e);
                    return Ok(Vec::new());
                }
                return Err(anyhow::anyhow!("Failed to list {}: {}", kind.plural(), e));
            }
        };

        tracing::debug!("Listed {} {}", list.items.len(), kind.plural());
        list.items
            .iter()
            .map(|obj| serde_json::to_value(obj).context("Failed to serialize resource"))
            .collect()
    }
}

#[async_trait]
impl ResourceSource for KubeSource {
    async fn fetch(&self, namespace: Option<String>) -> Result<Snapshot> {
        let namespace = namespace.as_deref();
        let (applications, application_sets) = futures::future::try_join(
            self.list(ArgoResourceKind::Application, namespace),
            self.list(ArgoResourceKind::ApplicationSet, namespace),
        )
        .await?;

        Ok(Snapshot {
            applications,
            application_sets,
        })
    }

    fn source_type(&self) -> &'static str {
        "kubernetes"
    }
}
