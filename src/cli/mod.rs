//! CLI command handling module
//!
//! Handles all CLI subcommands and argument parsing.

mod commands;
mod logging;

pub use commands::{
    AppsOfAppsArgs, ConfigSubcommand, GlobalArgs, handle_config_command, run_apps_of_apps,
};
pub use logging::init_logging;
