//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and listing of Argo CD
//! resources. Proxy settings (`HTTP_PROXY`, `HTTPS_PROXY`, `NO_PROXY`) are
//! honoured by kube-rs itself.

mod fetch;

pub use fetch::{KubeSource, api_resource};

use anyhow::{Context, Result};
use kube::{Client, Config};

/// Initialize and return a Kubernetes client
///
/// Uses the default kubeconfig loading strategy:
/// 1. In-cluster config (if running in a pod)
/// 2. KUBECONFIG environment variable
/// 3. ~/.kube/config
pub async fn create_client() -> Result<Client> {
    let config = Config::infer()
        .await
        .context("Failed to load Kubernetes configuration")?;
    tracing::debug!("Connecting to cluster at {}", config.cluster_url);

    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(client)
}

