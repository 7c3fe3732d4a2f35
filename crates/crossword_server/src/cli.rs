//! Command-line interface for crossword_server.

use clap::{Parser, Subcommand};

/// Crossword Helper - language model backed crossword solving
#[derive(Parser, Debug)]
#[command(name = "crossword_server")]
#[command(about = "Crossword clue solver and hint server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Path to the TOML config file (defaults are used if it is missing)
        #[arg(short, long, default_value = "crossword.toml")]
        config: std::path::PathBuf,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Check a word against a pattern without contacting a provider
    Validate {
        /// Candidate word
        #[arg(long)]
        word: String,

        /// Known letters and placements, `_` for unknown
        #[arg(long)]
        pattern: String,

        /// Expected number of letters (defaults to the pattern length)
        #[arg(long)]
        num_letters: Option<usize>,
    },
}
