//! Configuration for dataset preparation.
//!
//! All settings live in one immutable struct built before any data is
//! loaded. Derived values (like the vocabulary size) are stored on the
//! components that compute them, never written back here.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// How raw text is split into tokens before vocabulary lookup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tokenization {
    /// One token per character; suits character-level vocabularies.
    #[default]
    Char,
    /// Whitespace-separated words; suits word-level vocabularies.
    Word,
}

impl fmt::Display for Tokenization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tokenization::Char => write!(f, "char"),
            Tokenization::Word => write!(f, "word"),
        }
    }
}

/// Dataset preparation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub vocab_path: String,
    pub schema_path: String,
    /// Encoded sequence length; longer inputs are truncated, shorter ones
    /// zero-padded on the right.
    pub max_length: usize,
    pub batch_size: usize,
    /// Virtual length reported by the training dataset. Every indexed
    /// access re-samples, so this bounds how many draws make one epoch.
    pub epoch_data_size: usize,
    #[serde(default)]
    pub tokenization: Tokenization,
    /// Shuffle the evaluation batch order.
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_shuffle() -> bool {
    true
}

fn default_seed() -> u64 {
    42
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            vocab_path: "data/chars.txt".to_string(),
            schema_path: "data/schema.json".to_string(),
            max_length: 20,
            batch_size: 32,
            epoch_data_size: 200,
            tokenization: Tokenization::Char,
            shuffle: true,
            seed: 42,
        }
    }
}

impl DataConfig {
    /// Load settings from a JSON file and validate them.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_length == 0 {
            anyhow::bail!("max_length must be > 0");
        }
        if self.batch_size == 0 {
            anyhow::bail!("batch_size must be > 0");
        }
        if self.epoch_data_size == 0 {
            anyhow::bail!("epoch_data_size must be > 0");
        }
        Ok(())
    }
}
