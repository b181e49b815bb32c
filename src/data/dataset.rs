//! Length/indexed-access adapters over the two corpus modes.

use crate::data::corpus::{KnowledgeBank, LabeledPair};
use crate::data::sampler::{SampleError, Triplet, TripletSampler};
use rand::Rng;

/// Training-mode dataset: a fixed virtual length with a fresh random
/// triplet behind every index.
#[derive(Debug)]
pub struct TripletDataset {
    sampler: TripletSampler,
    epoch_size: usize,
}

impl TripletDataset {
    pub fn new(bank: KnowledgeBank, epoch_size: usize) -> Result<Self, SampleError> {
        Ok(Self {
            sampler: TripletSampler::new(bank)?,
            epoch_size,
        })
    }

    /// The configured virtual size, independent of how many examples the
    /// bank actually holds.
    pub fn len(&self) -> usize {
        self.epoch_size
    }

    pub fn is_empty(&self) -> bool {
        self.epoch_size == 0
    }

    /// Indexed access re-samples; the index only exists so loaders can
    /// iterate by position.
    pub fn get(&self, _index: usize) -> Result<Triplet, SampleError> {
        self.sampler.sample(&mut rand::thread_rng())
    }

    /// Like [`TripletDataset::get`] with a caller-supplied RNG, for
    /// reproducible draws.
    pub fn get_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Triplet, SampleError> {
        self.sampler.sample(rng)
    }

    pub fn sampler(&self) -> &TripletSampler {
        &self.sampler
    }
}

/// Evaluation-mode dataset: literal length, stored items.
#[derive(Debug)]
pub struct PairDataset {
    pairs: Vec<LabeledPair>,
}

impl PairDataset {
    pub fn new(pairs: Vec<LabeledPair>) -> Self {
        Self { pairs }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LabeledPair> {
        self.pairs.get(index)
    }

    pub fn pairs(&self) -> &[LabeledPair] {
        &self.pairs
    }
}
