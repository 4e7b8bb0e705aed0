//! minibase - conjunctive query engine and query minimizer
//!
//! File-backed relations, a rule-based planner over pull-based operators,
//! and homomorphism-based minimization of single-rule queries.

pub mod catalog;
pub mod cli;
pub mod executor;
pub mod minimizer;
pub mod observability;
pub mod planner;
pub mod query;
