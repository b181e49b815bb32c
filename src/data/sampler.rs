//! Anchor/positive/negative sampling from the knowledge bank.

use crate::data::corpus::KnowledgeBank;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

/// Resampling attempts before a draw fails instead of spinning.
pub const MAX_RESAMPLE_ATTEMPTS: usize = 64;

#[derive(Error, Debug)]
pub enum SampleError {
    #[error("triplet sampling needs at least two classes, the bank has {0}")]
    TooFewClasses(usize),

    #[error("no anchor class with at least two examples found after {0} resampling attempts")]
    InsufficientClassDiversity(usize),
}

/// One metric-learning example: `anchor` and `positive` encode phrasings of
/// the same intent, `negative` a phrasing of a different one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Triplet {
    pub anchor: Vec<u32>,
    pub positive: Vec<u32>,
    pub negative: Vec<u32>,
}

/// Stateless random draw over a read-only bank.
///
/// The sampler holds no mutable state, so it can be shared across threads
/// as long as each caller brings its own RNG.
#[derive(Debug)]
pub struct TripletSampler {
    bank: KnowledgeBank,
    class_ids: Vec<usize>,
}

impl TripletSampler {
    /// Wrap a loaded bank. Fails up front when fewer than two classes are
    /// known, since no valid triplet can ever be drawn then.
    pub fn new(bank: KnowledgeBank) -> Result<Self, SampleError> {
        let class_ids = bank.class_ids();
        if class_ids.len() < 2 {
            return Err(SampleError::TooFewClasses(class_ids.len()));
        }
        Ok(Self { bank, class_ids })
    }

    pub fn bank(&self) -> &KnowledgeBank {
        &self.bank
    }

    /// Draw one anchor/positive/negative triplet.
    ///
    /// Two distinct classes are drawn first. The anchor class must hold at
    /// least two examples; when it does not, it is redrawn uniformly from
    /// all classes, at most [`MAX_RESAMPLE_ATTEMPTS`] times before the draw
    /// fails with [`SampleError::InsufficientClassDiversity`].
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Triplet, SampleError> {
        let picked = rand::seq::index::sample(rng, self.class_ids.len(), 2);
        let mut anchor_class = self.class_ids[picked.index(0)];
        let negative_class = self.class_ids[picked.index(1)];

        let mut attempts = 0;
        while anchor_class == negative_class || self.examples(anchor_class).len() < 2 {
            if attempts >= MAX_RESAMPLE_ATTEMPTS {
                return Err(SampleError::InsufficientClassDiversity(attempts));
            }
            anchor_class = self.class_ids[rng.gen_range(0..self.class_ids.len())];
            attempts += 1;
        }

        let anchor_bank = self.examples(anchor_class);
        let negative_bank = self.examples(negative_class);
        let pair = rand::seq::index::sample(rng, anchor_bank.len(), 2);

        Ok(Triplet {
            anchor: anchor_bank[pair.index(0)].clone(),
            positive: anchor_bank[pair.index(1)].clone(),
            negative: negative_bank[rng.gen_range(0..negative_bank.len())].clone(),
        })
    }

    fn examples(&self, class_id: usize) -> &[Vec<u32>] {
        self.bank.examples(class_id).unwrap_or(&[])
    }
}
