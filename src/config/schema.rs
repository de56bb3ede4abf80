//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use crate::pipeline::DEFAULT_NAMESPACE;
use crate::render::OutputFormat;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Namespace Argo CD runs in; used for listing and for names without a namespace
    #[serde(default = "default_namespace")]
    pub default_namespace: String,

    /// List resources across all namespaces
    #[serde(default = "default_false")]
    pub all_namespaces: bool,

    /// Render a tree instead of a graph
    #[serde(default = "default_false")]
    pub tree: bool,

    /// Default start node selectors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub start: Vec<String>,

    /// Default stop node selectors
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Output file; `-` for stdout, unset for `apps-of-apps.<ext>`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

// Default value functions
fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_false() -> bool {
    false
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_namespace: default_namespace(),
            all_namespaces: false,
            tree: false,
            start: Vec::new(),
            stop: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}
