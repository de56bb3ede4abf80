//! Argo CD resource kind definitions
//!
//! Centralized enum for the two Argo CD CRD kinds that take part in an
//! apps-of-apps hierarchy. Avoids hardcoded kind strings in the graph code.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// API group shared by all Argo CD custom resources
pub const ARGO_API_GROUP: &str = "argoproj.io";

/// API version served for Application and ApplicationSet
pub const ARGO_API_VERSION: &str = "v1alpha1";

/// Kind of a node in the apps-of-apps graph
///
/// `Application` is a single deployable unit, `ApplicationSet` templates
/// several Applications from its generators. Declaration order defines
/// `Ord`, so Applications sort before ApplicationSets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ArgoResourceKind {
    Application,
    ApplicationSet,
}

impl ArgoResourceKind {
    /// Get the Kubernetes kind name
    pub fn as_str(&self) -> &'static str {
        match self {
            ArgoResourceKind::Application => "Application",
            ArgoResourceKind::ApplicationSet => "ApplicationSet",
        }
    }

    /// Get the plural resource name used in API paths
    pub fn plural(&self) -> &'static str {
        match self {
            ArgoResourceKind::Application => "applications",
            ArgoResourceKind::ApplicationSet => "applicationsets",
        }
    }

    /// Try to parse a string into an ArgoResourceKind, returning None if invalid
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// Get all Argo CD kinds handled by the graph
    pub fn all() -> &'static [Self] {
        &[
            ArgoResourceKind::Application,
            ArgoResourceKind::ApplicationSet,
        ]
    }

    /// Parse a kind alias as typed on the command line (case-insensitive)
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "application" | "applications" | "app" | "apps" => {
                Some(ArgoResourceKind::Application)
            }
            "applicationset" | "applicationsets" | "appset" | "appsets" => {
                Some(ArgoResourceKind::ApplicationSet)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ArgoResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ArgoResourceKind> for String {
    fn from(kind: ArgoResourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for ArgoResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Application" => Ok(ArgoResourceKind::Application),
            "ApplicationSet" => Ok(ArgoResourceKind::ApplicationSet),
            _ => Err(format!("Unknown Argo CD resource kind: {}", s)),
        }
    }
}
