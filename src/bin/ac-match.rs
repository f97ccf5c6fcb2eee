mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{cmd_info, cmd_match};

#[derive(Parser)]
#[command(name = "ac-match")]
#[command(
    about = "SIMD-accelerated multi-pattern byte matcher",
    long_about = "ac-match - Compile a pattern dictionary into an Aho-Corasick automaton \n\
    and scan text for every occurrence of any pattern.\n\n\
    Examples:\n\
      ac-match match patterns.txt input.log\n\
      ac-match match patterns.txt input.log --stats\n\
      ac-match info"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an automaton from a pattern file and scan one or more inputs
    Match {
        /// Pattern file, one pattern per line (# comments and blank lines skipped)
        #[arg(value_name = "PATTERNS")]
        patterns: PathBuf,

        /// Files to scan, or "-" for stdin
        #[arg(value_name = "INPUT", required = true)]
        inputs: Vec<PathBuf>,

        /// Use the extended engine's capacity limits instead of the default
        #[arg(long)]
        extended: bool,

        /// Maximum matches to report per input (0 = unlimited, capped at 1_000_000)
        #[arg(long, default_value = "10000")]
        max_matches: usize,

        /// Print search statistics to stderr after scanning
        #[arg(short, long)]
        stats: bool,
    },

    /// Print detected CPU SIMD support
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            patterns,
            inputs,
            extended,
            max_matches,
            stats,
        } => cmd_match(patterns, inputs, extended, max_matches, stats),
        Commands::Info => cmd_info(),
    }
}
