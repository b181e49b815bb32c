//! Vocabulary loading and token-id lookup.
//!
//! The vocabulary file holds one token per line. Ids are assigned
//! sequentially starting at 1 in file order; id 0 is reserved for padding
//! and never names a real token.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

/// Reserved id marking unused trailing positions in a fixed-length sequence.
pub const PAD_ID: u32 = 0;

/// Token that unknown input maps to. Must appear in every vocabulary file.
pub const UNK_TOKEN: &str = "[UNK]";

#[derive(Error, Debug)]
pub enum VocabError {
    #[error("failed to read vocabulary file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("vocabulary file {path} does not define the [UNK] token")]
    MissingUnkToken { path: String },
}

/// Immutable token → id table.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    token_to_id: HashMap<String, u32>,
    unk_id: u32,
}

impl Vocabulary {
    /// Load a vocabulary, one token per line.
    ///
    /// The first occurrence of a token wins; later duplicates are logged
    /// and skipped so ids stay gapless in `[1, len]`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VocabError> {
        let path = path.as_ref();
        let io_err = |source| VocabError::Io {
            path: path.display().to_string(),
            source,
        };

        let file = File::open(path).map_err(io_err)?;
        let mut token_to_id = HashMap::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(io_err)?;
            let token = line.trim();
            if token_to_id.contains_key(token) {
                tracing::warn!("duplicate vocabulary token {:?} ignored", token);
                continue;
            }
            let id = token_to_id.len() as u32 + 1;
            token_to_id.insert(token.to_string(), id);
        }

        let unk_id = match token_to_id.get(UNK_TOKEN) {
            Some(&id) => id,
            None => {
                return Err(VocabError::MissingUnkToken {
                    path: path.display().to_string(),
                })
            }
        };

        tracing::info!(
            "loaded {} vocabulary tokens from {}",
            token_to_id.len(),
            path.display()
        );
        Ok(Self { token_to_id, unk_id })
    }

    /// Number of tokens; ids run from 1 through this value.
    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }

    pub fn unk_id(&self) -> u32 {
        self.unk_id
    }

    /// Id of a known token.
    pub fn id_of(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Id of a token, falling back to the [UNK] id.
    pub fn id_or_unk(&self, token: &str) -> u32 {
        self.id_of(token).unwrap_or(self.unk_id)
    }
}
