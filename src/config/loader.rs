//! Configuration loading logic
//!
//! Precedence order (highest to lowest):
//! 1. Command-line flags (applied by the caller)
//! 2. Environment variable overrides
//! 3. Root config file
//! 4. Built-in defaults

use super::{paths, schema::Config};
use crate::render::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the root config file plus environment overrides
    pub fn load() -> Result<Config> {
        let root_path = paths::root_config_path();
        let config = if root_path.exists() {
            Self::load_file(&root_path)?
        } else {
            tracing::debug!("No config file at {}, using defaults", root_path.display());
            Self::load_defaults()
        };

        Ok(Self::apply_env_overrides(config))
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        // An empty file is a valid, default configuration
        if contents.trim().is_empty() {
            return Ok(Self::load_defaults());
        }

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration file, failing on syntax errors, wrong
    /// value types and selectors that cannot be parsed
    pub fn validate() -> Result<()> {
        let config = Self::load().context("Failed to load configuration")?;

        if config.default_namespace.trim().is_empty() {
            return Err(anyhow::anyhow!("defaultNamespace must not be empty"));
        }

        for selector in config.start.iter().chain(&config.stop) {
            crate::graph::parse_selector(selector, &config.default_namespace)
                .with_context(|| format!("Invalid selector in configuration: {}", selector))?;
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        Config::default()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // ARGO_AOA_NAMESPACE override
        if let Ok(namespace) = std::env::var("ARGO_AOA_NAMESPACE") {
            if !namespace.is_empty() {
                config.default_namespace = namespace;
            }
        }

        // ARGO_AOA_FORMAT override
        if let Ok(format) = std::env::var("ARGO_AOA_FORMAT") {
            match format.parse::<OutputFormat>() {
                Ok(format) => config.output.format = format,
                Err(e) => tracing::warn!("Ignoring ARGO_AOA_FORMAT: {}", e),
            }
        }

        // ARGO_AOA_TREE override
        if let Ok(tree) = std::env::var("ARGO_AOA_TREE") {
            if let Ok(val) = tree.parse::<bool>() {
                config.tree = val;
            }
        }

        config
    }

    /// Save configuration to a file
    pub fn save(config: &Config, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            paths::ensure_dir(parent)?;
        }

        let yaml =
            serde_yaml::to_string(config).context("Failed to serialize configuration to YAML")?;

        std::fs::write(path, yaml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Save root configuration
    pub fn save_root(config: &Config) -> Result<()> {
        Self::save(config, &paths::root_config_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.default_namespace, "argocd");
        assert!(!config.all_namespaces);
    }

    #[test]
    fn test_save_and_load_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.yaml");

        let config = Config {
            default_namespace: "gitops".to_string(),
            tree: true,
            stop: vec!["appset/addons".to_string()],
            ..Default::default()
        };
        ConfigLoader::save(&config, &path).unwrap();

        let loaded = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_file_missing_and_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.yaml");
        assert!(ConfigLoader::load_file(&missing).is_err());

        let empty = tmp.path().join("empty.yaml");
        std::fs::write(&empty, "\n").unwrap();
        assert_eq!(ConfigLoader::load_file(&empty).unwrap(), Config::default());
    }

    #[test]
    fn test_load_file_rejects_wrong_types() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "tree: sometimes\n").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // No other test reads these variables, and they are removed below.
        unsafe {
            std::env::set_var("ARGO_AOA_NAMESPACE", "team-gitops");
            std::env::set_var("ARGO_AOA_FORMAT", "json");
            std::env::set_var("ARGO_AOA_TREE", "true");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.default_namespace, "team-gitops");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.tree);

        // SAFETY: same as set_var above.
        unsafe {
            std::env::remove_var("ARGO_AOA_NAMESPACE");
            std::env::remove_var("ARGO_AOA_FORMAT");
            std::env::remove_var("ARGO_AOA_TREE");
        }
    }
}
