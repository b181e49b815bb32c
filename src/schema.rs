//! Intent schema loading.

use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;

/// Label name → class id mapping. Loaded once, immutable afterward.
#[derive(Debug, Clone)]
pub struct Schema {
    labels: HashMap<String, usize>,
}

impl Schema {
    /// Load the schema from a JSON object mapping label names to class ids.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading schema file {}", path.display()))?;
        let labels: HashMap<String, usize> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing schema file {}", path.display()))?;
        tracing::info!("loaded {} schema labels from {}", labels.len(), path.display());
        Ok(Self { labels })
    }

    /// Class id for a label, if the schema knows it.
    pub fn class_id(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
