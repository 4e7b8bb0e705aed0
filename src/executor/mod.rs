//! Execution operators for minibase
//!
//! Every operator implements the same pull protocol (`Operator`):
//! `next_tuple` yields the next tuple or `None` once exhausted,
//! `reset` rewinds the subtree, `schema` describes the emitted fields.
//!
//! # Operators
//!
//! 1. Scan: reads and decodes a relation file
//! 2. Select: constant matching, repeated-variable equality, predicates
//! 3. Join: nested loop, outer-major order
//! 4. Project: narrowing with duplicate elimination
//! 5. Sum: blocking SUM-of-products, optionally grouped
//!
//! Variable positions are resolved when an operator is constructed, never
//! per tuple. Every error is fatal to the evaluation.

mod compare;
mod errors;
mod join;
mod operator;
mod project;
mod scan;
mod select;
mod sum;
mod tuple;

#[cfg(test)]
mod testing;

pub use compare::{compare_constants, BoundPredicate, JoinPredicate, Operand};
pub use errors::{ErrorKind, ExecutorError, ExecutorErrorCode, ExecutorResult};
pub use join::JoinOperator;
pub use operator::{collect_all, CollectSink, Operator, TupleSink};
pub use project::ProjectOperator;
pub use scan::{decode_row, ScanOperator};
pub use select::SelectOperator;
pub use sum::SumOperator;
pub use tuple::Tuple;
