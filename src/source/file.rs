//! File resource source (for offline runs and testing)

use super::{ResourceSource, Snapshot};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Reads Argo CD resources from a `kubectl get -o json|yaml` dump
///
/// Accepted layouts: a `List` with `items`, a single object, or a bare
/// array of objects. YAML is a superset of JSON, so both parse the same way.
pub struct FileSource {
    file_path: PathBuf,
}

impl FileSource {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        let file_path = file_path.into();
        tracing::debug!("Created file source: {:?}", file_path);
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl ResourceSource for FileSource {
    async fn fetch(&self, namespace: Option<String>) -> Result<Snapshot> {
        tracing::debug!("Reading resources from file: {:?}", self.file_path);

        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .with_context(|| format!("Failed to read file: {:?}", self.file_path))?;

        if content.trim().is_empty() {
            return Ok(Snapshot::default());
        }

        let document: Value = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse resources from file: {:?}", self.file_path))?;

        let items = match document {
            Value::Array(items) => items,
            Value::Object(mut obj) => match obj.remove("items") {
                Some(Value::Array(items)) => items,
                Some(Value::Null) => Vec::new(),
                Some(_) => anyhow::bail!("'items' is not a list in {:?}", self.file_path),
                None => vec![Value::Object(obj)],
            },
            Value::Null => Vec::new(),
            _ => anyhow::bail!("Unexpected document in {:?}", self.file_path),
        };

        let items = match namespace {
            Some(ns) => items
                .into_iter()
                .filter(|item| {
                    item.get("metadata")
                        .and_then(|m| m.get("namespace"))
                        .and_then(|n| n.as_str())
                        .is_none_or(|item_ns| item_ns == ns)
                })
                .collect(),
            None => items,
        };

        Ok(Snapshot::from_items(items))
    }

    fn source_type(&self) -> &'static str {
        "file"
    }
}
