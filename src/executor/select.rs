//! Select: filters child tuples
//!
//! A tuple passes only if every check holds:
//! - each constant in the schema atom equals the field at its position
//! - each repeated variable carries equal fields at all its positions
//! - each comparison predicate evaluates to true

use crate::query::{ComparisonAtom, ComparisonOp, Constant, RelationalAtom};

use super::compare::{compare_constants, BoundPredicate};
use super::errors::{ExecutorError, ExecutorResult};
use super::operator::Operator;
use super::tuple::Tuple;

pub struct SelectOperator {
    child: Box<dyn Operator>,
    schema: RelationalAtom,
    /// (position, required value)
    constants: Vec<(usize, Constant)>,
    /// (first position, later position) of a repeated variable
    equalities: Vec<(usize, usize)>,
    predicates: Vec<BoundPredicate>,
}

impl SelectOperator {
    /// Wraps `child`. Predicates referencing no schema variable are dropped;
    /// a predicate referencing only some of its variables is an error.
    pub fn new(child: Box<dyn Operator>, predicates: &[ComparisonAtom]) -> ExecutorResult<Self> {
        let schema = child.schema().clone();

        let mut constants = Vec::new();
        let mut equalities = Vec::new();
        for (pos, term) in schema.terms().iter().enumerate() {
            if let Some(c) = term.as_constant() {
                constants.push((pos, c.clone()));
            } else if let Some(v) = term.as_variable() {
                if let Some(first) = schema.position_of(v).filter(|&first| first != pos) {
                    equalities.push((first, pos));
                }
            }
        }

        let mut bound = Vec::new();
        for pred in predicates {
            let vars = pred.variables();
            let present = vars.iter().filter(|v| schema.contains_variable(v)).count();
            if !vars.is_empty() && present == 0 {
                continue;
            }
            let resolved = BoundPredicate::bind(pred, &schema)
                .ok_or_else(|| ExecutorError::term_unresolved(pred, &schema))?;
            bound.push(resolved);
        }

        Ok(Self {
            child,
            schema,
            constants,
            equalities,
            predicates: bound,
        })
    }

    pub fn predicates(&self) -> &[BoundPredicate] {
        &self.predicates
    }

    fn accepts(&self, tuple: &Tuple) -> bool {
        let constants_ok = self.constants.iter().all(|(pos, c)| {
            tuple
                .field(*pos)
                .is_some_and(|f| compare_constants(f, ComparisonOp::Eq, c))
        });
        let equalities_ok = self
            .equalities
            .iter()
            .all(|&(a, b)| match (tuple.field(a), tuple.field(b)) {
                (Some(x), Some(y)) => compare_constants(x, ComparisonOp::Eq, y),
                _ => false,
            });
        constants_ok && equalities_ok && self.predicates.iter().all(|p| p.matches(tuple))
    }
}

impl Operator for SelectOperator {
    fn next_tuple(&mut self) -> ExecutorResult<Option<Tuple>> {
        while let Some(tuple) = self.child.next_tuple()? {
            if self.accepts(&tuple) {
                return Ok(Some(tuple));
            }
        }
        Ok(None)
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.child.reset()
    }

    fn schema(&self) -> &RelationalAtom {
        &self.schema
    }

    fn label(&self) -> String {
        if self.predicates.is_empty() {
            return format!("Select {}", self.schema);
        }
        let preds: Vec<String> = self.predicates.iter().map(|p| p.to_string()).collect();
        format!("Select {} [{}]", self.schema, preds.join(", "))
    }

    fn children(&self) -> Vec<&dyn Operator> {
        vec![self.child.as_ref()]
    }
}
