//! argo-aoa - Visualize Argo CD apps-of-apps hierarchies
//!
//! Lists Applications and ApplicationSets from the cluster (or a dump file),
//! links them into a graph and renders it as text, JSON or Graphviz.

use anyhow::Result;
use argo_aoa::cli::{
    AppsOfAppsArgs, ConfigSubcommand, GlobalArgs, handle_config_command, init_logging,
    run_apps_of_apps,
};
use clap::{Parser, Subcommand};

/// argo-aoa - Visualize Argo CD apps-of-apps hierarchies
#[derive(Parser, Debug)]
#[command(name = "argo-aoa", version)]
#[command(about = "Visualize Argo CD apps-of-apps hierarchies as graphs and trees", long_about = None)]
struct Args {
    #[command(flatten)]
    global: GlobalArgs,

    /// Command to run; defaults to apps-of-apps
    #[command(subcommand)]
    command: Option<Command>,
}

/// Main commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Build and render the apps-of-apps graph
    AppsOfApps(AppsOfAppsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.global.debug);
    tracing::debug!("Debug logging enabled");

    match args.command {
        Some(Command::Config { subcommand }) => handle_config_command(subcommand).await,
        Some(Command::AppsOfApps(aoa)) => run_apps_of_apps(&args.global, &aoa).await,
        None => run_apps_of_apps(&args.global, &AppsOfAppsArgs::default()).await,
    }
}
