//! Query text parse errors

use thiserror::Error;

/// Result type for parsing
pub type ParseResult<T> = Result<T, ParseError>;

/// Query parse failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("query text is empty")]
    Empty,

    #[error("malformed query near `{remainder}`")]
    Syntax { remainder: String },

    #[error("head declares more than one SUM aggregate")]
    MultipleAggregates,

    #[error("SUM term {0} must be a variable or an integer constant")]
    InvalidAggregateTerm(String),

    #[error("failed to read query file {path}: {reason}")]
    Io { path: String, reason: String },
}

impl ParseError {
    const CONTEXT_CHARS: usize = 40;

    /// Syntax error pointing at the unparsed remainder, clipped for display
    pub fn syntax(remainder: &str) -> Self {
        let trimmed = remainder.trim();
        let clipped: String = trimmed.chars().take(Self::CONTEXT_CHARS).collect();
        let remainder = if trimmed.chars().count() > Self::CONTEXT_CHARS {
            format!("{}...", clipped)
        } else if clipped.is_empty() {
            "<end of input>".to_string()
        } else {
            clipped
        };
        ParseError::Syntax { remainder }
    }
}
