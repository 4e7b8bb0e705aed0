//! minibase CLI entry point
//!
//! Parses arguments and dispatches through `cli::run`. On failure the
//! stage-tagged error goes to stderr and the process exits with status 1.

use minibase::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
