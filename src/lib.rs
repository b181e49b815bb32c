//! Triplet dataset preparation for sentence matching
//!
//! This crate turns a labeled intent corpus into training material for a
//! triplet-loss sentence matcher: text is tokenized into fixed-length
//! integer id sequences against a file-defined vocabulary, grouped by
//! intent into a knowledge bank, and served as random
//! anchor/positive/negative triplets, with a parallel path producing
//! stored (question, label) pairs for evaluation.
//!
//! ## Main Components
//!
//! - `config`: immutable dataset-preparation settings
//! - `vocab`: token → id table loading
//! - `encoder`: fixed-length sentence encoding
//! - `schema`: label → class id mapping
//! - `data`: corpus loading, triplet sampling, batch assembly

pub mod config;
pub mod data;
pub mod encoder;
pub mod schema;
pub mod vocab;

pub use config::{DataConfig, Tokenization};
pub use data::corpus::{CorpusError, CorpusFormat, KnowledgeBank, LabeledPair};
pub use data::dataset::{PairDataset, TripletDataset};
pub use data::loader::{load_evaluation, load_training, PairLoader, TripletLoader};
pub use data::sampler::{SampleError, Triplet, TripletSampler};
pub use encoder::SentenceEncoder;
pub use schema::Schema;
pub use vocab::{VocabError, Vocabulary, PAD_ID, UNK_TOKEN};

/// Library errors
pub use anyhow::{Error, Result};
