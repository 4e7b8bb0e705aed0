//! Join: nested-loop join of two children
//!
//! For each outer tuple the inner child is reset and scanned in full.
//! Output is outer fields followed by inner fields, in outer-major order.
//!
//! Match test is the conjunction of:
//! - explicit comparison conditions with one variable on each side
//! - equality on every variable present on both sides
//!
//! With neither, the join is a Cartesian product.

use crate::query::{ComparisonAtom, ComparisonOp, RelationalAtom, Term};

use super::compare::JoinPredicate;
use super::errors::ExecutorResult;
use super::operator::Operator;
use super::tuple::Tuple;

pub struct JoinOperator {
    outer: Box<dyn Operator>,
    inner: Box<dyn Operator>,
    schema: RelationalAtom,
    predicates: Vec<JoinPredicate>,
    current: Option<Tuple>,
    /// Inner child has been pulled since its last reset
    inner_dirty: bool,
}

impl JoinOperator {
    /// Joins `outer` with `inner`. Conditions that do not split across the
    /// two schemas are ignored.
    pub fn new(
        outer: Box<dyn Operator>,
        inner: Box<dyn Operator>,
        conditions: &[ComparisonAtom],
    ) -> Self {
        let left = outer.schema();
        let right = inner.schema();

        let mut predicates: Vec<JoinPredicate> = conditions
            .iter()
            .filter_map(|c| Self::split_condition(c, left, right))
            .collect();

        for var in left.variables() {
            if let (Some(l), Some(r)) = (left.position_of(var), right.position_of(var)) {
                predicates.push(JoinPredicate {
                    left_index: l,
                    op: ComparisonOp::Eq,
                    right_index: r,
                    label: format!("{} = {}", var, var),
                });
            }
        }

        let mut terms = left.terms().to_vec();
        terms.extend_from_slice(right.terms());
        let schema = RelationalAtom::new("Join", terms);

        Self {
            outer,
            inner,
            schema,
            predicates,
            current: None,
            inner_dirty: false,
        }
    }

    /// Resolves `condition` with its left operand in `left` and its right
    /// operand in `right`, mirroring the operator if the operands must swap.
    pub fn split_condition(
        condition: &ComparisonAtom,
        left: &RelationalAtom,
        right: &RelationalAtom,
    ) -> Option<JoinPredicate> {
        let resolve = |c: &ComparisonAtom| -> Option<JoinPredicate> {
            let (Term::Variable(a), Term::Variable(b)) = (&c.left, &c.right) else {
                return None;
            };
            Some(JoinPredicate {
                left_index: left.position_of(a)?,
                op: c.op,
                right_index: right.position_of(b)?,
                label: c.to_string(),
            })
        };
        resolve(condition).or_else(|| resolve(&condition.mirrored()))
    }

    pub fn predicates(&self) -> &[JoinPredicate] {
        &self.predicates
    }

    pub fn is_cartesian(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl Operator for JoinOperator {
    fn next_tuple(&mut self) -> ExecutorResult<Option<Tuple>> {
        loop {
            if self.current.is_none() {
                match self.outer.next_tuple()? {
                    None => return Ok(None),
                    Some(tuple) => self.current = Some(tuple),
                }
                if self.inner_dirty {
                    self.inner.reset()?;
                }
                self.inner_dirty = true;
            }

            if let Some(outer) = &self.current {
                while let Some(inner) = self.inner.next_tuple()? {
                    if self.predicates.iter().all(|p| p.matches(outer, &inner)) {
                        return Ok(Some(outer.concat(&inner)));
                    }
                }
            }
            self.current = None;
        }
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.outer.reset()?;
        self.inner.reset()?;
        self.current = None;
        self.inner_dirty = false;
        Ok(())
    }

    fn schema(&self) -> &RelationalAtom {
        &self.schema
    }

    fn label(&self) -> String {
        if self.predicates.is_empty() {
            return "Join cartesian".to_string();
        }
        let conds: Vec<&str> = self.predicates.iter().map(|p| p.label.as_str()).collect();
        format!("Join on {}", conds.join(" and "))
    }

    fn children(&self) -> Vec<&dyn Operator> {
        vec![self.outer.as_ref(), self.inner.as_ref()]
    }
}
