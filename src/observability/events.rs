//! Lifecycle events for minibase
//!
//! Events are explicit and typed; their names are stable strings.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Setup
    /// Configuration file read and validated
    ConfigLoaded,
    /// Schema file read
    CatalogLoaded,

    // Query lifecycle
    /// Query text parsed
    QueryParsed,
    /// Operator tree built
    QueryPlanned,
    /// All result tuples written
    QueryComplete,
    /// Evaluation aborted (FATAL)
    QueryRejected,

    // Minimizer
    /// A redundant body atom was removed
    MinimizeAtomRemoved,
    /// No redundant atom remains
    MinimizeComplete,

    // Explain
    /// Plan rendered
    ExplainComplete,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::QueryParsed => "QUERY_PARSED",
            Event::QueryPlanned => "QUERY_PLANNED",
            Event::QueryComplete => "QUERY_COMPLETE",
            Event::QueryRejected => "QUERY_REJECTED",
            Event::MinimizeAtomRemoved => "MINIMIZE_ATOM_REMOVED",
            Event::MinimizeComplete => "MINIMIZE_COMPLETE",
            Event::ExplainComplete => "EXPLAIN_COMPLETE",
        }
    }

    /// Returns true if this event aborts the run
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::QueryRejected)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
