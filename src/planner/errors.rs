//! Planner error types
//!
//! Error codes:
//! - MINIBASE_PLAN_UNKNOWN_RELATION (REJECT)
//! - MINIBASE_PLAN_ARITY_MISMATCH (REJECT)
//! - MINIBASE_PLAN_UNBOUND_VARIABLE (REJECT)
//! - MINIBASE_PLAN_EMPTY_BODY (REJECT)
//! - MINIBASE_PLAN_OPERATOR_FAILED (REJECT)
//!
//! All planner errors are raised before any tuple is produced.

use std::fmt;

use crate::executor::ExecutorError;

/// Severity levels for planner errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Query rejected before evaluation
    Reject,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Reject => write!(f, "REJECT"),
        }
    }
}

/// Planner-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlannerErrorCode {
    /// Relation name not present in the catalog
    UnknownRelation,
    /// Atom arity differs from the catalog entry
    ArityMismatch,
    /// Head, aggregate or comparison variable not bound by a relational atom
    UnboundVariable,
    /// Body has no relational atom
    EmptyBody,
    /// An operator rejected its inputs at construction
    OperatorFailed,
}

impl PlannerErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            PlannerErrorCode::UnknownRelation => "MINIBASE_PLAN_UNKNOWN_RELATION",
            PlannerErrorCode::ArityMismatch => "MINIBASE_PLAN_ARITY_MISMATCH",
            PlannerErrorCode::UnboundVariable => "MINIBASE_PLAN_UNBOUND_VARIABLE",
            PlannerErrorCode::EmptyBody => "MINIBASE_PLAN_EMPTY_BODY",
            PlannerErrorCode::OperatorFailed => "MINIBASE_PLAN_OPERATOR_FAILED",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        Severity::Reject
    }
}

impl fmt::Display for PlannerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Planner error type with full context
#[derive(Debug, Clone)]
pub struct PlannerError {
    code: PlannerErrorCode,
    message: String,
    /// Relation name if applicable
    relation: Option<String>,
    source: Option<ExecutorError>,
}

impl PlannerError {
    pub fn unknown_relation(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: PlannerErrorCode::UnknownRelation,
            message: format!("Relation '{}' is not declared in the schema", name),
            relation: Some(name),
            source: None,
        }
    }

    pub fn arity_mismatch(name: impl Into<String>, declared: usize, used: usize) -> Self {
        let name = name.into();
        Self {
            code: PlannerErrorCode::ArityMismatch,
            message: format!(
                "Relation '{}' declares {} columns but is used with {} terms",
                name, declared, used
            ),
            relation: Some(name),
            source: None,
        }
    }

    /// `context` names where the variable was used, e.g. "head"
    pub fn unbound_variable(var: impl fmt::Display, context: impl fmt::Display) -> Self {
        Self {
            code: PlannerErrorCode::UnboundVariable,
            message: format!(
                "Variable '{}' in {} is not bound by any relational atom",
                var, context
            ),
            relation: None,
            source: None,
        }
    }

    pub fn empty_body() -> Self {
        Self {
            code: PlannerErrorCode::EmptyBody,
            message: "Query body contains no relational atom".into(),
            relation: None,
            source: None,
        }
    }

    pub fn operator_failed(operator: impl Into<String>, source: ExecutorError) -> Self {
        Self {
            code: PlannerErrorCode::OperatorFailed,
            message: format!("Cannot build {}", operator.into()),
            relation: None,
            source: Some(source),
        }
    }

    pub fn code(&self) -> PlannerErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for planner operations
pub type PlannerResult<T> = Result<T, PlannerError>;
