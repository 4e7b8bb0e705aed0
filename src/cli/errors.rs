//! CLI error type
//!
//! Every failure is fatal and carries the stage it happened in, so the
//! user-facing message names both the stage and the cause.

use std::io;
use std::path::Path;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::executor::ExecutorError;
use crate::minimizer::MinimizeError;
use crate::planner::PlannerError;
use crate::query::ParseError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config stage failed: {0}")]
    Config(String),

    #[error("parse stage failed: {0}")]
    Parse(#[from] ParseError),

    #[error("catalog stage failed: {0}")]
    Catalog(#[from] CatalogError),

    #[error("plan stage failed: {0}")]
    Plan(#[from] PlannerError),

    #[error("execute stage failed: {0}")]
    Execute(#[from] ExecutorError),

    #[error("minimize stage failed: {0}")]
    Minimize(#[from] MinimizeError),

    #[error("io stage failed: {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    pub fn io(path: &Path, source: io::Error) -> Self {
        CliError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// Stage name used in logs
    pub fn stage(&self) -> &'static str {
        match self {
            CliError::Config(_) => "config",
            CliError::Parse(_) => "parse",
            CliError::Catalog(_) => "catalog",
            CliError::Plan(_) => "plan",
            CliError::Execute(_) => "execute",
            CliError::Minimize(_) => "minimize",
            CliError::Io { .. } => "io",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_names_stage_and_cause() {
        let err = CliError::from(MinimizeError::ComparisonAtom("x < 3".into()));
        assert_eq!(err.stage(), "minimize");
        let msg = err.to_string();
        assert!(msg.starts_with("minimize stage failed"));
        assert!(msg.contains("x < 3"));
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = CliError::io(
            Path::new("/out/result.csv"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.stage(), "io");
        assert!(err.to_string().contains("/out/result.csv"));
    }
}
