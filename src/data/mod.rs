//! Corpus loading, triplet sampling, and batch assembly.

pub mod corpus;
pub mod dataset;
pub mod loader;
pub mod sampler;

pub use corpus::{CorpusError, CorpusFormat, KnowledgeBank, LabeledPair};
pub use dataset::{PairDataset, TripletDataset};
pub use loader::{load_evaluation, load_training, PairLoader, TripletLoader};
pub use sampler::{SampleError, Triplet, TripletSampler};
