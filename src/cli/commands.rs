//! CLI command handlers

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::config::{ConfigLoader, paths, schema::Config};
use crate::pipeline::BuildOptions;
use crate::render::{self, OutputFormat};
use crate::source::{self, FileSource, ResourceSource};

/// Flags shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,

    /// Namespace Argo CD runs in (overrides defaultNamespace)
    #[arg(long, short = 'n', global = true)]
    pub namespace: Option<String>,

    /// List Applications and ApplicationSets in all namespaces
    #[arg(long, short = 'A', global = true)]
    pub all_namespaces: bool,
}

/// Arguments of the apps-of-apps command
#[derive(Args, Debug, Clone, Default)]
pub struct AppsOfAppsArgs {
    /// Start node selector `[kind/][namespace/]name` (repeatable)
    #[arg(long)]
    pub start: Vec<String>,

    /// Stop node selector; the node is kept but not expanded (repeatable)
    #[arg(long)]
    pub stop: Vec<String>,

    /// Render a tree instead of the full graph
    #[arg(long, short = 't')]
    pub tree: bool,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file, `-` for stdout
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Read resources from a `kubectl get -o json|yaml` dump instead of the cluster
    #[arg(long)]
    pub from_file: Option<PathBuf>,
}

/// Where rendered output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OutputTarget {
    Stdout,
    File(PathBuf),
}

/// Effective settings after merging config, environment and flags
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RunSettings {
    /// Namespace to list from; `None` lists all namespaces
    pub list_namespace: Option<String>,
    pub options: BuildOptions,
    pub format: OutputFormat,
    pub target: OutputTarget,
}

impl RunSettings {
    /// Flags win over the config file, which already carries env overrides
    pub(crate) fn resolve(config: &Config, global: &GlobalArgs, args: &AppsOfAppsArgs) -> Self {
        let default_namespace = global
            .namespace
            .clone()
            .unwrap_or_else(|| config.default_namespace.clone());

        // An explicit -n beats allNamespaces from the config file
        let all_namespaces =
            global.all_namespaces || (config.all_namespaces && global.namespace.is_none());
        let list_namespace = (!all_namespaces).then(|| default_namespace.clone());

        let start = if args.start.is_empty() {
            config.start.clone()
        } else {
            args.start.clone()
        };
        let stop = if args.stop.is_empty() {
            config.stop.clone()
        } else {
            args.stop.clone()
        };

        let format = args.format.unwrap_or(config.output.format);
        let target = match args.output.as_ref().or(config.output.file.as_ref()) {
            Some(path) if path == "-" => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(PathBuf::from(path)),
            None => OutputTarget::File(PathBuf::from(format.default_file_name())),
        };

        RunSettings {
            list_namespace,
            options: BuildOptions {
                default_namespace,
                start,
                stop,
                tree: args.tree || config.tree,
            },
            format,
            target,
        }
    }
}

/// Build and render the apps-of-apps view
pub async fn run_apps_of_apps(global: &GlobalArgs, args: &AppsOfAppsArgs) -> Result<()> {
    let config = ConfigLoader::load().context("Failed to load configuration")?;
    let settings = RunSettings::resolve(&config, global, args);

    if settings.options.start.is_empty() {
        tracing::info!("No start nodes given, starting from graph roots");
    } else {
        tracing::info!("Start nodes: {}", settings.options.start.join(", "));
    }
    if !settings.options.stop.is_empty() {
        tracing::info!("Stop nodes: {}", settings.options.stop.join(", "));
    }

    let source: Box<dyn ResourceSource> = match &args.from_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => {
            let client = crate::kube::create_client().await?;
            Box::new(crate::kube::KubeSource::new(client))
        }
    };

    let output = source::collect(
        source.as_ref(),
        settings.list_namespace.clone(),
        &settings.options,
    )
    .await?;

    for diagnostic in output.diagnostics.iter() {
        tracing::warn!("{}", diagnostic);
    }

    let rendered = render::render(&output, settings.format)?;

    match &settings.target {
        OutputTarget::Stdout => print!("{}", rendered),
        OutputTarget::File(path) => {
            tokio::fs::write(path, rendered)
                .await
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            eprintln!(
                "Wrote {} nodes as {} to {}",
                output.graph.node_count(),
                settings.format,
                path.display()
            );
        }
    }

    Ok(())
}

/// Configuration management subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Get configuration value
    Get {
        /// Configuration key (e.g., "defaultNamespace", "output.format")
        key: Option<String>,
    },
    /// Set configuration value
    Set {
        /// Configuration key (e.g., "defaultNamespace", "output.format")
        key: String,
        /// Configuration value; lists accept `a,b` or `[a, b]`
        value: String,
    },
    /// List all configuration
    List,
    /// Show configuration file path
    Path,
    /// Validate configuration
    Validate,
}

/// Handle configuration subcommands
pub async fn handle_config_command(cmd: ConfigSubcommand) -> Result<()> {
    match cmd {
        ConfigSubcommand::Get { key } => {
            // Load config (will use defaults if no file exists)
            let config = ConfigLoader::load().context("Failed to load configuration")?;

            if let Some(key) = key {
                let value = crate::config::get_config_value(&config, &key)?;
                println!("{}", value);
            } else {
                let yaml =
                    serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
                print!("{}", yaml);
            }
        }
        ConfigSubcommand::Set { key, value } => {
            // Start from the file alone so env overrides are not persisted
            let root_path = paths::root_config_path();
            let mut config = if root_path.exists() {
                ConfigLoader::load_file(&root_path)?
            } else {
                ConfigLoader::load_defaults()
            };

            crate::config::set_config_value(&mut config, &key, &value)
                .with_context(|| format!("Failed to set {} = {}", key, value))?;

            ConfigLoader::save_root(&config).context("Failed to save configuration")?;
            println!("Configuration saved");
        }
        ConfigSubcommand::List => {
            let config = ConfigLoader::load().context("Failed to load configuration")?;

            let yaml =
                serde_yaml::to_string(&config).context("Failed to serialize configuration")?;
            print!("{}", yaml);
        }
        ConfigSubcommand::Path => {
            let config_path = paths::root_config_path();
            println!("{}", config_path.display());
        }
        ConfigSubcommand::Validate => match ConfigLoader::validate() {
            Ok(()) => {
                println!("Configuration is valid");
            }
            Err(e) => {
                eprintln!("Configuration validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
