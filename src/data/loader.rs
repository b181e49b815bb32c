//! Batch assembly over the datasets.
//!
//! [`load_training`] and [`load_evaluation`] are the one-call entry points:
//! they build the vocabulary, schema, encoder, corpus, dataset, and loader
//! from a [`DataConfig`] so a training loop only ever sees batches.

use crate::config::DataConfig;
use crate::data::corpus::{self, LabeledPair};
use crate::data::dataset::{PairDataset, TripletDataset};
use crate::data::sampler::{SampleError, Triplet};
use crate::encoder::SentenceEncoder;
use crate::schema::Schema;
use crate::vocab::Vocabulary;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::Path;

/// Groups stochastic triplets into fixed-size batches.
#[derive(Debug)]
pub struct TripletLoader {
    dataset: TripletDataset,
    batch_size: usize,
}

impl TripletLoader {
    pub fn new(dataset: TripletDataset, batch_size: usize) -> anyhow::Result<Self> {
        if batch_size == 0 {
            anyhow::bail!("batch_size must be > 0");
        }
        Ok(Self {
            dataset,
            batch_size,
        })
    }

    pub fn dataset(&self) -> &TripletDataset {
        &self.dataset
    }

    pub fn num_batches(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size)
    }

    /// One epoch of batches; the final batch may be short. Each item is a
    /// fresh draw, so a failed draw surfaces in the batch it belongs to.
    pub fn batches(&self) -> impl Iterator<Item = Result<Vec<Triplet>, SampleError>> + '_ {
        let total = self.dataset.len();
        let batch_size = self.batch_size;
        (0..total).step_by(batch_size).map(move |start| {
            let end = (start + batch_size).min(total);
            (start..end).map(|index| self.dataset.get(index)).collect()
        })
    }
}

/// Groups stored evaluation pairs into batches, optionally shuffled.
#[derive(Debug)]
pub struct PairLoader {
    dataset: PairDataset,
    batch_size: usize,
    shuffle: bool,
    seed: u64,
}

impl PairLoader {
    pub fn new(
        dataset: PairDataset,
        batch_size: usize,
        shuffle: bool,
        seed: u64,
    ) -> anyhow::Result<Self> {
        if batch_size == 0 {
            anyhow::bail!("batch_size must be > 0");
        }
        Ok(Self {
            dataset,
            batch_size,
            shuffle,
            seed,
        })
    }

    pub fn dataset(&self) -> &PairDataset {
        &self.dataset
    }

    pub fn num_batches(&self) -> usize {
        self.dataset.len().div_ceil(self.batch_size)
    }

    /// One pass over every stored pair. Shuffling permutes the visit order
    /// with a seeded RNG, so the same seed yields the same epoch.
    pub fn batches(&self) -> Vec<Vec<LabeledPair>> {
        let mut order: Vec<usize> = (0..self.dataset.len()).collect();
        if self.shuffle {
            let mut rng = StdRng::seed_from_u64(self.seed);
            order.shuffle(&mut rng);
        }

        order
            .chunks(self.batch_size)
            .map(|chunk| {
                chunk
                    .iter()
                    .map(|&index| self.dataset.pairs()[index].clone())
                    .collect()
            })
            .collect()
    }
}

/// Build the full training pipeline from configuration.
pub fn load_training(path: impl AsRef<Path>, config: &DataConfig) -> anyhow::Result<TripletLoader> {
    config.validate()?;
    let vocab = Vocabulary::from_file(&config.vocab_path)?;
    let schema = Schema::from_file(&config.schema_path)?;
    let encoder = SentenceEncoder::new(vocab, config.tokenization, config.max_length);
    let bank = corpus::load_knowledge_bank(path.as_ref(), &schema, &encoder)?;
    let dataset = TripletDataset::new(bank, config.epoch_data_size)?;
    TripletLoader::new(dataset, config.batch_size)
}

/// Build the full evaluation pipeline from configuration.
pub fn load_evaluation(path: impl AsRef<Path>, config: &DataConfig) -> anyhow::Result<PairLoader> {
    config.validate()?;
    let vocab = Vocabulary::from_file(&config.vocab_path)?;
    let schema = Schema::from_file(&config.schema_path)?;
    let encoder = SentenceEncoder::new(vocab, config.tokenization, config.max_length);
    let pairs = corpus::load_labeled_pairs(path.as_ref(), &schema, &encoder)?;
    PairLoader::new(
        PairDataset::new(pairs),
        config.batch_size,
        config.shuffle,
        config.seed,
    )
}
