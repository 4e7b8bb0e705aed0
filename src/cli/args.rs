//! CLI argument definitions using clap
//!
//! Commands:
//! - minibase evaluate <DATABASE_DIR> <INPUT_FILE> <OUTPUT_FILE>
//! - minibase minimize <INPUT_FILE> <OUTPUT_FILE>
//! - minibase explain <DATABASE_DIR> <INPUT_FILE>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// minibase - conjunctive query engine and minimizer
#[derive(Parser, Debug)]
#[command(name = "minibase")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log stage boundaries (INFO) to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Evaluate a query against a database directory
    Evaluate {
        /// Directory holding the schema file and relation files
        database_dir: PathBuf,
        /// File containing the query
        input_file: PathBuf,
        /// Result file, one tuple per line (truncated)
        output_file: PathBuf,
    },

    /// Remove redundant body atoms from a query
    Minimize {
        /// File containing the query
        input_file: PathBuf,
        /// Destination for the minimized query
        output_file: PathBuf,
    },

    /// Print the operator tree for a query without running it
    Explain {
        /// Directory holding the schema file and relation files
        database_dir: PathBuf,
        /// File containing the query
        input_file: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
