//! Comparison semantics for selection and join predicates
//!
//! Constants of different kinds never satisfy any comparison, not even `!=`.
//! No coercion between integers and strings.

use std::cmp::Ordering;
use std::fmt;

use crate::query::{ComparisonAtom, ComparisonOp, Constant, RelationalAtom, Term};

use super::tuple::Tuple;

/// Evaluates `left op right`
pub fn compare_constants(left: &Constant, op: ComparisonOp, right: &Constant) -> bool {
    let ordering = match left.partial_cmp(right) {
        Some(o) => o,
        None => return false,
    };

    match op {
        ComparisonOp::Eq => ordering == Ordering::Equal,
        ComparisonOp::Neq => ordering != Ordering::Equal,
        ComparisonOp::Lt => ordering == Ordering::Less,
        ComparisonOp::Leq => ordering != Ordering::Greater,
        ComparisonOp::Gt => ordering == Ordering::Greater,
        ComparisonOp::Geq => ordering != Ordering::Less,
    }
}

/// One side of a predicate after resolution against a schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Tuple field at this position
    Field(usize),
    /// Literal value
    Value(Constant),
}

impl Operand {
    /// Resolves a term against `schema`; `None` if a variable is absent
    pub fn resolve(term: &Term, schema: &RelationalAtom) -> Option<Self> {
        match term {
            Term::Constant(c) => Some(Operand::Value(c.clone())),
            Term::Variable(v) => schema.position_of(v).map(Operand::Field),
        }
    }

    fn value<'a>(&'a self, tuple: &'a Tuple) -> Option<&'a Constant> {
        match self {
            Operand::Field(i) => tuple.field(*i),
            Operand::Value(c) => Some(c),
        }
    }
}

/// A comparison atom with both operands resolved against one schema
#[derive(Debug, Clone)]
pub struct BoundPredicate {
    source: ComparisonAtom,
    left: Operand,
    right: Operand,
}

impl BoundPredicate {
    /// Binds `atom` to `schema`. Returns `None` unless every variable resolves.
    pub fn bind(atom: &ComparisonAtom, schema: &RelationalAtom) -> Option<Self> {
        Some(Self {
            source: atom.clone(),
            left: Operand::resolve(&atom.left, schema)?,
            right: Operand::resolve(&atom.right, schema)?,
        })
    }

    /// True if `tuple` satisfies the predicate
    pub fn matches(&self, tuple: &Tuple) -> bool {
        match (self.left.value(tuple), self.right.value(tuple)) {
            (Some(l), Some(r)) => compare_constants(l, self.source.op, r),
            _ => false,
        }
    }
}

impl fmt::Display for BoundPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.fmt(f)
    }
}

/// `outer[left_index] op inner[right_index]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinPredicate {
    pub left_index: usize,
    pub op: ComparisonOp,
    pub right_index: usize,
    /// Display form, with the left operand resolving in the outer child
    pub label: String,
}

impl JoinPredicate {
    pub fn matches(&self, outer: &Tuple, inner: &Tuple) -> bool {
        match (outer.field(self.left_index), inner.field(self.right_index)) {
            (Some(l), Some(r)) => compare_constants(l, self.op, r),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(v: i64) -> Constant {
        Constant::Integer(v)
    }

    #[test]
    fn test_integer_comparisons() {
        assert!(compare_constants(&int(1), ComparisonOp::Lt, &int(2)));
        assert!(compare_constants(&int(2), ComparisonOp::Leq, &int(2)));
        assert!(compare_constants(&int(3), ComparisonOp::Gt, &int(2)));
        assert!(compare_constants(&int(2), ComparisonOp::Geq, &int(2)));
        assert!(compare_constants(&int(2), ComparisonOp::Eq, &int(2)));
        assert!(compare_constants(&int(2), ComparisonOp::Neq, &int(3)));
        assert!(!compare_constants(&int(2), ComparisonOp::Lt, &int(2)));
    }

    #[test]
    fn test_string_comparisons() {
        let a = Constant::from("apple");
        let b = Constant::from("banana");
        assert!(compare_constants(&a, ComparisonOp::Lt, &b));
        assert!(compare_constants(&a, ComparisonOp::Neq, &b));
        assert!(!compare_constants(&a, ComparisonOp::Eq, &b));
    }

    #[test]
    fn test_cross_kind_always_false() {
        let i = int(4);
        let s = Constant::from("4");
        for op in [
            ComparisonOp::Eq,
            ComparisonOp::Neq,
            ComparisonOp::Lt,
            ComparisonOp::Leq,
            ComparisonOp::Gt,
            ComparisonOp::Geq,
        ] {
            assert!(!compare_constants(&i, op, &s));
        }
    }

    #[test]
    fn test_bind_predicate_against_schema() {
        let schema = RelationalAtom::new("R", vec![Term::var("x"), Term::var("y")]);
        let pred = ComparisonAtom::new(Term::var("y"), ComparisonOp::Gt, Term::var("x"));
        let bound = BoundPredicate::bind(&pred, &schema).unwrap();

        assert!(bound.matches(&Tuple::new(vec![int(1), int(5)])));
        assert!(!bound.matches(&Tuple::new(vec![int(5), int(1)])));

        let unbound = ComparisonAtom::new(Term::var("z"), ComparisonOp::Eq, Term::int(1));
        assert!(BoundPredicate::bind(&unbound, &schema).is_none());
    }

    #[test]
    fn test_join_predicate() {
        let pred = JoinPredicate {
            left_index: 1,
            op: ComparisonOp::Lt,
            right_index: 0,
            label: "y < z".into(),
        };
        let outer = Tuple::new(vec![int(1), int(2)]);
        assert!(pred.matches(&outer, &Tuple::new(vec![int(3)])));
        assert!(!pred.matches(&outer, &Tuple::new(vec![int(2)])));
    }
}
