//! Output renderers for a finished build
//!
//! - `text` - indented tree or adjacency listing for the terminal
//! - `json` - machine-readable nodes, edges, tree and diagnostics
//! - `dot` - Graphviz digraph

mod dot;
mod json;
mod text;

pub use dot::render_dot;
pub use json::render_json;
pub use text::render_text;

use crate::pipeline::BuildOutput;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base name of the rendered file
pub const DEFAULT_OUTPUT_STEM: &str = "apps-of-apps";

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Dot,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Dot => "dot",
        }
    }

    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Dot => "dot",
        }
    }

    /// Default output file name for the format
    pub fn default_file_name(&self) -> String {
        format!("{}.{}", DEFAULT_OUTPUT_STEM, self.extension())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "dot" | "graphviz" => Ok(OutputFormat::Dot),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Render a build in the requested format
pub fn render(output: &BuildOutput, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(output)),
        OutputFormat::Json => render_json(output),
        OutputFormat::Dot => Ok(render_dot(output)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("graphviz".parse::<OutputFormat>(), Ok(OutputFormat::Dot));
        assert!("html".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(OutputFormat::Dot.default_file_name(), "apps-of-apps.dot");
        assert_eq!(OutputFormat::default().default_file_name(), "apps-of-apps.txt");
    }
}
