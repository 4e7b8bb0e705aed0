//! Fixed-point query minimization
//!
//! Repeatedly removes the first redundant body atom and restarts on the
//! reduced query until a full pass removes nothing. Every removal builds a
//! new `Query`; the input is never modified.

use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::query::Query;

use super::homomorphism::has_homomorphism;

/// Minimizer failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MinimizeError {
    #[error("cannot minimize a query with comparison atoms (found '{0}')")]
    ComparisonAtom(String),
}

pub type MinimizeResult<T> = Result<T, MinimizeError>;

/// Returns an equivalent query with no redundant body atom.
///
/// The head is carried over unchanged.
pub fn minimize(query: &Query) -> MinimizeResult<Query> {
    if let Some(cmp) = query.comparison_atoms().next() {
        return Err(MinimizeError::ComparisonAtom(cmp.to_string()));
    }

    let mut current = query.clone();
    while let Some(index) = (0..current.body().len()).find(|&i| has_homomorphism(&current, i)) {
        let atom = current.body()[index].to_string();
        let position = index.to_string();
        log_event_with_fields(
            Event::MinimizeAtomRemoved,
            &[("atom", atom.as_str()), ("position", position.as_str())],
        );
        current = current.without_atom(index);
    }

    Ok(current)
}
