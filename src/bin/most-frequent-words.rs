//! most-frequent-words
//!
//! Prints the N most frequent words of a text file, counted with a
//! `ChainTable`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chain_table::{
    word_freq::{count_file, format_ranking, top_n},
    TableConfig, DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR,
};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "most-frequent-words")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Print the most frequent words of a text file", long_about = None)]
struct Cli {
    /// Text file to read
    path: PathBuf,
    /// Number of words to print
    #[arg(short = 'n', long, default_value_t = 5, env = "MFW_TOP")]
    top: usize,
    /// Initial number of table slots
    #[arg(long, default_value_t = DEFAULT_CAPACITY, env = "MFW_CAPACITY")]
    capacity: usize,
    /// Load factor that triggers growth, in (0, 1]
    #[arg(long, default_value_t = DEFAULT_MAX_LOAD_FACTOR, env = "MFW_LOAD_FACTOR")]
    load_factor: f64,
    /// Enable debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_tracing(cli: &Cli) {
    let default = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = TableConfig::new()
        .with_initial_capacity(cli.capacity)
        .with_max_load_factor(cli.load_factor);
    let table = count_file(&cli.path, config)
        .with_context(|| format!("counting words in {}", cli.path.display()))?;
    debug!(stats = ?table.stats(), "table after counting");

    for line in format_ranking(&top_n(&table, cli.top)) {
        println!("{line}");
    }
    Ok(())
}
