//! Fixed-length sentence encoding.

use crate::config::Tokenization;
use crate::vocab::{Vocabulary, PAD_ID};

/// Turns raw text into fixed-length integer id sequences.
///
/// Vocabulary, tokenization mode, and target length are captured at
/// construction, so encoding the same text always yields the same ids.
#[derive(Debug, Clone)]
pub struct SentenceEncoder {
    vocab: Vocabulary,
    tokenization: Tokenization,
    max_length: usize,
}

impl SentenceEncoder {
    pub fn new(vocab: Vocabulary, tokenization: Tokenization, max_length: usize) -> Self {
        Self {
            vocab,
            tokenization,
            max_length,
        }
    }

    /// Encode text to exactly `max_length` ids.
    ///
    /// Unknown tokens map to the [UNK] id; longer inputs are truncated and
    /// shorter ones zero-padded on the right.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        let mut ids = Vec::with_capacity(self.max_length);
        match self.tokenization {
            Tokenization::Char => {
                let mut buf = [0u8; 4];
                for ch in text.chars() {
                    ids.push(self.vocab.id_or_unk(ch.encode_utf8(&mut buf)));
                }
            }
            Tokenization::Word => {
                for word in text.split_whitespace() {
                    ids.push(self.vocab.id_or_unk(word));
                }
            }
        }
        ids.truncate(self.max_length);
        ids.resize(self.max_length, PAD_ID);
        ids
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab_of(tokens: &[&str]) -> Vocabulary {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocab.txt");
        std::fs::write(&path, tokens.join("\n")).unwrap();
        Vocabulary::from_file(&path).unwrap()
    }

    #[test]
    fn test_char_mode_pads_to_max_length() {
        let vocab = vocab_of(&["[UNK]", "a", "b"]);
        let encoder = SentenceEncoder::new(vocab, Tokenization::Char, 5);
        assert_eq!(encoder.encode("ab"), vec![2, 3, 0, 0, 0]);
    }

    #[test]
    fn test_char_mode_truncates_to_max_length() {
        let vocab = vocab_of(&["[UNK]", "a", "b"]);
        let encoder = SentenceEncoder::new(vocab, Tokenization::Char, 3);
        assert_eq!(encoder.encode("ababab"), vec![2, 3, 2]);
    }

    #[test]
    fn test_word_mode_splits_on_whitespace() {
        let vocab = vocab_of(&["[UNK]", "check", "balance"]);
        let encoder = SentenceEncoder::new(vocab, Tokenization::Word, 4);
        assert_eq!(encoder.encode("check my balance"), vec![2, 1, 3, 0]);
    }

    #[test]
    fn test_empty_input_is_all_padding() {
        let vocab = vocab_of(&["[UNK]", "a"]);
        let encoder = SentenceEncoder::new(vocab, Tokenization::Char, 4);
        assert_eq!(encoder.encode(""), vec![0, 0, 0, 0]);
    }
}
