//! Conjunctive query model
//!
//! Immutable value types shared by the minimizer and the planner:
//! terms, relational and comparison atoms, and the `Head :- Body` query.
//! Also hosts the rule-notation parser used by the command line.

mod ast;
mod atom;
mod errors;
mod parser;
mod term;

pub use ast::{Head, Query, SumAggregate};
pub use atom::{Atom, ComparisonAtom, ComparisonOp, RelationalAtom};
pub use errors::{ParseError, ParseResult};
pub use parser::{parse_query, parse_query_file};
pub use term::{Constant, Term, Variable};
