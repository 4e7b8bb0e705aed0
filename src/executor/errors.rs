//! Executor error types
//!
//! Error codes:
//! - MINIBASE_DATA_ARITY_MISMATCH (data)
//! - MINIBASE_DATA_BAD_FIELD (data)
//! - MINIBASE_TERM_UNRESOLVED (logical)
//! - MINIBASE_AGGREGATE_NOT_INTEGER (logical)
//! - MINIBASE_AGGREGATE_OVERFLOW (logical)
//! - MINIBASE_RELATION_UNAVAILABLE (resource)
//! - MINIBASE_SINK_FAILED (resource)
//!
//! Every executor error is fatal: evaluation stops at the first one.

use std::fmt;

/// Error families
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed backing rows
    Data,
    /// Terms that cannot be resolved or evaluated
    Logical,
    /// Backing file missing or unreadable
    Resource,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Data => write!(f, "DATA"),
            ErrorKind::Logical => write!(f, "LOGICAL"),
            ErrorKind::Resource => write!(f, "RESOURCE"),
        }
    }
}

/// Executor-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutorErrorCode {
    /// Row field count differs from the relation arity
    DataArityMismatch,
    /// Field does not decode as its declared column type
    DataBadField,
    /// A variable is absent from the schema it must resolve against
    TermUnresolved,
    /// An aggregate input is not an integer
    AggregateNotInteger,
    /// Aggregate arithmetic overflowed i64
    AggregateOverflow,
    /// Relation file could not be opened or read
    RelationUnavailable,
    /// Result sink rejected a tuple
    SinkFailed,
}

impl ExecutorErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorErrorCode::DataArityMismatch => "MINIBASE_DATA_ARITY_MISMATCH",
            ExecutorErrorCode::DataBadField => "MINIBASE_DATA_BAD_FIELD",
            ExecutorErrorCode::TermUnresolved => "MINIBASE_TERM_UNRESOLVED",
            ExecutorErrorCode::AggregateNotInteger => "MINIBASE_AGGREGATE_NOT_INTEGER",
            ExecutorErrorCode::AggregateOverflow => "MINIBASE_AGGREGATE_OVERFLOW",
            ExecutorErrorCode::RelationUnavailable => "MINIBASE_RELATION_UNAVAILABLE",
            ExecutorErrorCode::SinkFailed => "MINIBASE_SINK_FAILED",
        }
    }

    /// Returns the error family
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExecutorErrorCode::DataArityMismatch | ExecutorErrorCode::DataBadField => {
                ErrorKind::Data
            }
            ExecutorErrorCode::TermUnresolved
            | ExecutorErrorCode::AggregateNotInteger
            | ExecutorErrorCode::AggregateOverflow => ErrorKind::Logical,
            ExecutorErrorCode::RelationUnavailable | ExecutorErrorCode::SinkFailed => {
                ErrorKind::Resource
            }
        }
    }
}

impl fmt::Display for ExecutorErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Executor error type with full context
#[derive(Debug, Clone)]
pub struct ExecutorError {
    code: ExecutorErrorCode,
    message: String,
    /// 1-based row number in the backing file, if applicable
    row: Option<usize>,
}

impl ExecutorError {
    /// Row has the wrong number of fields
    pub fn arity_mismatch(relation: &str, row: usize, expected: usize, found: usize) -> Self {
        Self {
            code: ExecutorErrorCode::DataArityMismatch,
            message: format!(
                "Relation '{}' row has {} fields, schema declares {}",
                relation, found, expected
            ),
            row: Some(row),
        }
    }

    /// Field failed to decode
    pub fn bad_field(relation: &str, row: usize, reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::DataBadField,
            message: format!("Relation '{}': {}", relation, reason.into()),
            row: Some(row),
        }
    }

    /// Variable missing from an operator schema
    pub fn term_unresolved(term: impl fmt::Display, schema: impl fmt::Display) -> Self {
        Self {
            code: ExecutorErrorCode::TermUnresolved,
            message: format!("Term '{}' does not occur in schema {}", term, schema),
            row: None,
        }
    }

    /// Aggregate input is not an integer
    pub fn aggregate_not_integer(term: impl fmt::Display, found: impl fmt::Display) -> Self {
        Self {
            code: ExecutorErrorCode::AggregateNotInteger,
            message: format!("SUM input '{}' is not an integer (found {})", term, found),
            row: None,
        }
    }

    /// Aggregate arithmetic overflow
    pub fn aggregate_overflow(aggregate: impl fmt::Display) -> Self {
        Self {
            code: ExecutorErrorCode::AggregateOverflow,
            message: format!("{} overflows a 64-bit integer", aggregate),
            row: None,
        }
    }

    /// Relation file cannot be opened or read
    pub fn relation_unavailable(path: impl fmt::Display, reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::RelationUnavailable,
            message: format!("Cannot read relation file {}: {}", path, reason.into()),
            row: None,
        }
    }

    /// Result sink failed to accept a tuple
    pub fn sink_failed(reason: impl Into<String>) -> Self {
        Self {
            code: ExecutorErrorCode::SinkFailed,
            message: format!("Cannot write result tuple: {}", reason.into()),
            row: None,
        }
    }

    pub fn code(&self) -> ExecutorErrorCode {
        self.code
    }

    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn row(&self) -> Option<usize> {
        self.row
    }
}

impl fmt::Display for ExecutorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[FATAL] {} ({}): {}",
            self.code.code(),
            self.code.kind(),
            self.message
        )?;
        if let Some(row) = self.row {
            write!(f, " at row {}", row)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExecutorError {}

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;
