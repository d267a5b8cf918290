use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::chunking::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE};

#[derive(Debug, Parser)]
#[command(
    name = "tfidx",
    about = "An in-memory TF-IDF retrieval engine for grounding chat assistants"
)]
pub struct Cli {
    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build indexes from two corpus files and retrieve context for a question
    Query(QueryArgs),
    /// Show chunk and vocabulary statistics for two corpus files
    Stats(StatsArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Corpus inputs (shared by query and stats) --

#[derive(Debug, Parser)]
pub struct CorpusArgs {
    /// Path to the reference corpus file
    #[arg(long)]
    pub reference: PathBuf,

    /// Path to the library corpus file
    #[arg(long)]
    pub library: PathBuf,

    /// Chunk window size in characters
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Overlap between adjacent chunks in characters
    #[arg(long, default_value_t = DEFAULT_CHUNK_OVERLAP)]
    pub overlap: usize,
}

// -- Query --

#[derive(Debug, Parser)]
pub struct QueryArgs {
    /// The question to retrieve context for
    pub question: String,

    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Number of chunks to retrieve per corpus
    #[arg(short = 'k', long, default_value = "3")]
    pub k_per_corpus: usize,

    /// Output retrieved chunks as JSON (with scores)
    #[arg(long)]
    pub json: bool,
}

// -- Stats --

#[derive(Debug, Parser)]
pub struct StatsArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "tfidx",
            &mut std::io::stdout(),
        );
    }
}
