pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tripletbank::config::DataConfig;
use tripletbank::data::CorpusFormat;

#[derive(Parser)]
#[command(name = "tripletbank")]
#[command(about = "Triplet dataset preparation for sentence matching", long_about = None)]
struct Cli {
    /// JSON config file; built-in defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a corpus: classes, example counts, vocabulary size
    Inspect {
        /// Corpus file (JSON lines)
        corpus: PathBuf,
        /// Record shape of the file: training or evaluation
        #[arg(long, default_value = "training")]
        format: CorpusFormat,
    },
    /// Draw triplets from a training corpus and print them as JSON lines
    Sample {
        /// Corpus file (JSON lines, training records)
        corpus: PathBuf,
        /// Number of triplets to draw
        #[arg(long, default_value = "1")]
        count: usize,
        /// Seed the draws instead of using thread-local randomness
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Assemble one epoch of batches and report what was produced
    Batches {
        /// Corpus file (JSON lines)
        corpus: PathBuf,
        /// Record shape of the file: training or evaluation
        #[arg(long, default_value = "training")]
        format: CorpusFormat,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DataConfig::from_file(path)?,
        None => DataConfig::default(),
    };

    match cli.command {
        Commands::Inspect { corpus, format } => commands::inspect(&corpus, format, &config),
        Commands::Sample {
            corpus,
            count,
            seed,
        } => commands::sample(&corpus, count, seed, &config),
        Commands::Batches { corpus, format } => commands::batches(&corpus, format, &config),
    }
}
