//! Configuration system for argo-aoa
//!
//! A single YAML file with defaults for namespace, start/stop selectors,
//! tree mode and output, overridable from the environment and the CLI.

pub mod loader;
pub mod paths;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, OutputConfig};

use crate::render::OutputFormat;

/// Get a configuration value by key (dot notation)
pub fn get_config_value(config: &Config, key: &str) -> anyhow::Result<String> {
    match key {
        "defaultNamespace" => Ok(config.default_namespace.clone()),
        "allNamespaces" => Ok(config.all_namespaces.to_string()),
        "tree" => Ok(config.tree.to_string()),
        "start" => Ok(config.start.join(",")),
        "stop" => Ok(config.stop.join(",")),
        "output.format" => Ok(config.output.format.to_string()),
        "output.file" => Ok(config.output.file.clone().unwrap_or_default()),
        _ => Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }
}

/// Set a configuration value by key (dot notation)
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    use anyhow::Context;
    match key {
        "defaultNamespace" => {
            if value.trim().is_empty() {
                return Err(anyhow::anyhow!("defaultNamespace must not be empty"));
            }
            config.default_namespace = value.to_string();
        }
        "allNamespaces" => {
            config.all_namespaces = value
                .parse()
                .context("allNamespaces must be 'true' or 'false'")?;
        }
        "tree" => {
            config.tree = value.parse().context("tree must be 'true' or 'false'")?;
        }
        "start" => {
            config.start = parse_list(value);
        }
        "stop" => {
            config.stop = parse_list(value);
        }
        "output.format" => {
            config.output.format = value
                .parse::<OutputFormat>()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        "output.file" => {
            if value.is_empty() {
                config.output.file = None;
            } else {
                config.output.file = Some(value.to_string());
            }
        }
        _ => return Err(anyhow::anyhow!("Unknown configuration key: {}", key)),
    }

    Ok(())
}

/// Parse a YAML array or comma-separated list
fn parse_list(value: &str) -> Vec<String> {
    if value.trim_start().starts_with('[') {
        if let Ok(list) = serde_yaml::from_str::<Vec<String>>(value) {
            return list;
        }
    }
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
