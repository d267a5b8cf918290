use clap::Parser;
use tfidx::{
    chunking::ChunkingConfig,
    cli::{Cli, Command, CorpusArgs, QueryArgs, StatsArgs},
    engine::RetrievalEngine,
    error::Result,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("TFIDX_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("warn")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match cli.command {
        Command::Query(args) => cmd_query(&args),
        Command::Stats(args) => cmd_stats(&args),
        Command::Completions(args) => {
            args.generate();
            Ok(())
        }
    }
}

/// Load both corpus files and build a fully initialized engine.
fn build_engine(corpus: &CorpusArgs) -> Result<RetrievalEngine> {
    let reference = std::fs::read_to_string(&corpus.reference)?;
    let library = std::fs::read_to_string(&corpus.library)?;

    let mut engine = RetrievalEngine::new(ChunkingConfig {
        chunk_size: corpus.chunk_size,
        overlap: corpus.overlap,
    });
    engine.initialize(&reference, &library)?;
    Ok(engine)
}

fn cmd_query(args: &QueryArgs) -> Result<()> {
    let mut engine = build_engine(&args.corpus)?;

    if args.json {
        let retrieved = engine.retrieve(&args.question, args.k_per_corpus)?;
        println!("{}", serde_json::to_string_pretty(&retrieved)?);
    } else {
        let context = engine.query(&args.question, args.k_per_corpus)?;
        println!("{context}");
    }
    Ok(())
}

fn cmd_stats(args: &StatsArgs) -> Result<()> {
    let engine = build_engine(&args.corpus)?;
    let stats = engine.stats()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        for s in &stats {
            println!("{}: {} chunks, {} terms", s.corpus, s.chunks, s.terms);
        }
    }
    Ok(())
}
