//! Conjunctive query minimizer
//!
//! A body atom is redundant when the query maps homomorphically onto the
//! query without it, keeping head and aggregate variables fixed. Removing
//! redundant atoms until none remain yields an equivalent, smaller query.
//!
//! Only purely relational bodies are accepted; constants inside relational
//! atoms are allowed.

mod homomorphism;
mod minimizer;

pub use homomorphism::{equal_under_set_semantics, has_homomorphism, substitute, Substitution};
pub use minimizer::{minimize, MinimizeError, MinimizeResult};
