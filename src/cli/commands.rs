//! CLI command implementations

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tripletbank::config::DataConfig;
use tripletbank::data::corpus::{self, CorpusFormat};
use tripletbank::data::loader::{load_evaluation, load_training};
use tripletbank::encoder::SentenceEncoder;
use tripletbank::schema::Schema;
use tripletbank::vocab::Vocabulary;

pub fn inspect(corpus_path: &Path, format: CorpusFormat, config: &DataConfig) -> Result<()> {
    config.validate()?;
    let vocab = Vocabulary::from_file(&config.vocab_path)?;
    let schema = Schema::from_file(&config.schema_path)?;
    println!(
        "vocabulary: {} tokens ({} tokenization, max_length {})",
        vocab.len(),
        config.tokenization,
        config.max_length
    );
    println!("schema: {} labels", schema.len());

    let encoder = SentenceEncoder::new(vocab, config.tokenization, config.max_length);
    match format {
        CorpusFormat::Training => {
            let bank = corpus::load_knowledge_bank(corpus_path, &schema, &encoder)?;
            println!(
                "knowledge bank: {} examples across {} classes",
                bank.num_examples(),
                bank.num_classes()
            );
            for class_id in bank.class_ids() {
                let count = bank.examples(class_id).map_or(0, |e| e.len());
                println!("  class {:>4}: {} example(s)", class_id, count);
            }
        }
        CorpusFormat::Evaluation => {
            let pairs = corpus::load_labeled_pairs(corpus_path, &schema, &encoder)?;
            println!("evaluation set: {} pairs", pairs.len());
        }
    }

    Ok(())
}

pub fn sample(
    corpus_path: &Path,
    count: usize,
    seed: Option<u64>,
    config: &DataConfig,
) -> Result<()> {
    let loader = load_training(corpus_path, config)?;
    let dataset = loader.dataset();

    match seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..count {
                let triplet = dataset.get_with(&mut rng)?;
                println!("{}", serde_json::to_string(&triplet)?);
            }
        }
        None => {
            for index in 0..count {
                let triplet = dataset.get(index)?;
                println!("{}", serde_json::to_string(&triplet)?);
            }
        }
    }

    Ok(())
}

pub fn batches(corpus_path: &Path, format: CorpusFormat, config: &DataConfig) -> Result<()> {
    match format {
        CorpusFormat::Training => {
            let loader = load_training(corpus_path, config)?;
            println!(
                "virtual epoch of {} triplets in {} batches of up to {}",
                loader.dataset().len(),
                loader.num_batches(),
                config.batch_size
            );
            let mut drawn = 0;
            for batch in loader.batches() {
                drawn += batch?.len();
            }
            println!("drew {} triplets", drawn);
        }
        CorpusFormat::Evaluation => {
            let loader = load_evaluation(corpus_path, config)?;
            let batches = loader.batches();
            println!(
                "{} pairs in {} batches of up to {} (shuffle: {})",
                loader.dataset().len(),
                batches.len(),
                config.batch_size,
                config.shuffle
            );
        }
    }

    Ok(())
}
