//! CLI module for minibase
//!
//! Provides command-line interface for:
//! - evaluate: run a query against a database directory
//! - minimize: rewrite a query without redundant atoms
//! - explain: print the operator tree of a query

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{evaluate, explain, minimize_file, report_failure, run_command};
pub use config::Config;
pub use errors::{CliError, CliResult};
pub use io::{write_query_file, ResultWriter};

/// Parses process arguments and runs the selected command.
///
/// Failures are logged as `QUERY_REJECTED` before being returned.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli).map_err(|e| {
        report_failure(&e);
        e
    })
}
