//! Query planner subsystem for minibase
//!
//! Compiles a conjunctive query into a tree of physical operators.
//!
//! # Design Principles
//!
//! - Rule-based: no cost model, join order follows the body
//! - Pushdown: constants and local comparisons are checked at the leaves,
//!   tuples are narrowed below each join when no aggregate is present
//! - Fail early: unknown relations, arity mismatches and unbound variables
//!   are rejected before any tuple is read

mod errors;
mod explain;
mod planner;

pub use errors::{PlannerError, PlannerErrorCode, PlannerResult, Severity};
pub use explain::{ExplainNode, ExplainPlan};
pub use planner::{QueryPlanner, RelationCatalog};
