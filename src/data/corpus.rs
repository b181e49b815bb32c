//! JSON-lines corpus loading.
//!
//! A corpus file holds one record per line. Training files carry objects
//! (`{"questions": [...], "target": "..."}`), evaluation files two-element
//! arrays (`["question", "label"]`). The record shape is chosen once per
//! file with [`CorpusFormat`]; the loaders never sniff it from line shape,
//! so a mixed file fails on the first off-shape line instead of silently
//! switching modes.

use crate::encoder::SentenceEncoder;
use crate::schema::Schema;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Which record shape a corpus file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    Training,
    Evaluation,
}

impl fmt::Display for CorpusFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusFormat::Training => write!(f, "training"),
            CorpusFormat::Evaluation => write!(f, "evaluation"),
        }
    }
}

impl FromStr for CorpusFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "training" | "train" => Ok(CorpusFormat::Training),
            "evaluation" | "eval" | "test" => Ok(CorpusFormat::Evaluation),
            other => Err(format!(
                "unknown corpus format {:?} (expected training or evaluation)",
                other
            )),
        }
    }
}

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("failed to read corpus file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("corpus line {line} is not a valid {format} record")]
    Parse {
        line: usize,
        format: CorpusFormat,
        #[source]
        source: serde_json::Error,
    },

    #[error("corpus line {line} references label {label:?} absent from the schema")]
    UnknownLabel { line: usize, label: String },
}

/// One training record: every known phrasing of one intent.
#[derive(Debug, Deserialize)]
struct TrainingRecord {
    questions: Vec<String>,
    target: String,
}

/// An encoded question and its schema class id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledPair {
    pub input_ids: Vec<u32>,
    pub class_id: usize,
}

/// Encoded training examples grouped by class id.
///
/// Populated once at load time and read-only afterward; this is the
/// sampling source for triplets.
#[derive(Debug, Default)]
pub struct KnowledgeBank {
    classes: HashMap<usize, Vec<Vec<u32>>>,
}

impl KnowledgeBank {
    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Total encoded examples across all classes.
    pub fn num_examples(&self) -> usize {
        self.classes.values().map(Vec::len).sum()
    }

    /// Known class ids in ascending order.
    pub fn class_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self.classes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn examples(&self, class_id: usize) -> Option<&[Vec<u32>]> {
        self.classes.get(&class_id).map(Vec::as_slice)
    }

    fn push(&mut self, class_id: usize, input_ids: Vec<u32>) {
        self.classes.entry(class_id).or_default().push(input_ids);
    }
}

/// Load a training corpus into a knowledge bank keyed by class id.
pub fn load_knowledge_bank(
    path: impl AsRef<Path>,
    schema: &Schema,
    encoder: &SentenceEncoder,
) -> Result<KnowledgeBank, CorpusError> {
    let path = path.as_ref();
    let mut bank = KnowledgeBank::default();

    for_each_line(path, |line_no, line| {
        let record: TrainingRecord = serde_json::from_str(line).map_err(|source| {
            CorpusError::Parse {
                line: line_no,
                format: CorpusFormat::Training,
                source,
            }
        })?;
        let class_id =
            schema
                .class_id(&record.target)
                .ok_or_else(|| CorpusError::UnknownLabel {
                    line: line_no,
                    label: record.target.clone(),
                })?;
        for question in &record.questions {
            bank.push(class_id, encoder.encode(question));
        }
        Ok(())
    })?;

    tracing::info!(
        "loaded {} training examples across {} classes from {}",
        bank.num_examples(),
        bank.num_classes(),
        path.display()
    );
    Ok(bank)
}

/// Load an evaluation corpus into encoded (question, class id) pairs.
pub fn load_labeled_pairs(
    path: impl AsRef<Path>,
    schema: &Schema,
    encoder: &SentenceEncoder,
) -> Result<Vec<LabeledPair>, CorpusError> {
    let path = path.as_ref();
    let mut pairs = Vec::new();

    for_each_line(path, |line_no, line| {
        let (question, label): (String, String) =
            serde_json::from_str(line).map_err(|source| CorpusError::Parse {
                line: line_no,
                format: CorpusFormat::Evaluation,
                source,
            })?;
        let class_id = schema
            .class_id(&label)
            .ok_or(CorpusError::UnknownLabel {
                line: line_no,
                label,
            })?;
        pairs.push(LabeledPair {
            input_ids: encoder.encode(&question),
            class_id,
        });
        Ok(())
    })?;

    tracing::info!(
        "loaded {} evaluation pairs from {}",
        pairs.len(),
        path.display()
    );
    Ok(pairs)
}

/// Walk non-empty lines of a file with 1-based line numbers.
fn for_each_line(
    path: &Path,
    mut handle: impl FnMut(usize, &str) -> Result<(), CorpusError>,
) -> Result<(), CorpusError> {
    let io_err = |source| CorpusError::Io {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(io_err)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        handle(index + 1, trimmed)?;
    }
    Ok(())
}
