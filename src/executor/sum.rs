//! Sum: blocking SUM-of-products aggregate
//!
//! The first pull drains the child completely. Without group variables a
//! single tuple holding the total is emitted (0 for empty input). With
//! group variables one tuple per distinct key is emitted, key fields first,
//! in no particular order.

use std::collections::{HashMap, VecDeque};

use crate::query::{Constant, RelationalAtom, SumAggregate, Term, Variable};

use super::errors::{ExecutorError, ExecutorResult};
use super::operator::Operator;
use super::tuple::Tuple;

/// A product term resolved against the child schema
#[derive(Debug, Clone)]
enum Factor {
    Field { index: usize, term: Term },
    Literal(i64),
}

pub struct SumOperator {
    child: Box<dyn Operator>,
    schema: RelationalAtom,
    aggregate: SumAggregate,
    group_indices: Vec<usize>,
    factors: Vec<Factor>,
    /// Pending results; `None` until the child has been drained
    output: Option<VecDeque<Tuple>>,
}

impl SumOperator {
    pub fn new(
        child: Box<dyn Operator>,
        group: &[Variable],
        aggregate: &SumAggregate,
    ) -> ExecutorResult<Self> {
        let source = child.schema();

        let group_indices = group
            .iter()
            .map(|v| {
                source
                    .position_of(v)
                    .ok_or_else(|| ExecutorError::term_unresolved(v, source))
            })
            .collect::<ExecutorResult<Vec<_>>>()?;

        let factors = aggregate
            .product_terms()
            .iter()
            .map(|term| match term {
                Term::Variable(v) => source
                    .position_of(v)
                    .map(|index| Factor::Field {
                        index,
                        term: term.clone(),
                    })
                    .ok_or_else(|| ExecutorError::term_unresolved(v, source)),
                Term::Constant(Constant::Integer(n)) => Ok(Factor::Literal(*n)),
                Term::Constant(c) => Err(ExecutorError::aggregate_not_integer(term, c.kind())),
            })
            .collect::<ExecutorResult<Vec<_>>>()?;

        let mut terms: Vec<Term> = group.iter().cloned().map(Term::Variable).collect();
        terms.push(Term::var(aggregate.to_string()));
        let schema = RelationalAtom::new("Sum", terms);

        Ok(Self {
            child,
            schema,
            aggregate: aggregate.clone(),
            group_indices,
            factors,
            output: None,
        })
    }

    fn row_value(&self, tuple: &Tuple) -> ExecutorResult<i64> {
        let mut product: i64 = 1;
        for factor in &self.factors {
            let value = match factor {
                Factor::Literal(n) => *n,
                Factor::Field { index, term } => match tuple.field(*index) {
                    Some(Constant::Integer(n)) => *n,
                    Some(other) => {
                        return Err(ExecutorError::aggregate_not_integer(term, other.kind()))
                    }
                    None => return Err(ExecutorError::term_unresolved(term, &self.schema)),
                },
            };
            product = product
                .checked_mul(value)
                .ok_or_else(|| ExecutorError::aggregate_overflow(&self.aggregate))?;
        }
        Ok(product)
    }

    fn drain(&mut self) -> ExecutorResult<VecDeque<Tuple>> {
        if self.group_indices.is_empty() {
            let mut total: i64 = 0;
            while let Some(tuple) = self.child.next_tuple()? {
                total = total
                    .checked_add(self.row_value(&tuple)?)
                    .ok_or_else(|| ExecutorError::aggregate_overflow(&self.aggregate))?;
            }
            return Ok(VecDeque::from(vec![Tuple::new(vec![Constant::Integer(total)])]));
        }

        let mut groups: HashMap<Tuple, i64> = HashMap::new();
        while let Some(tuple) = self.child.next_tuple()? {
            let value = self.row_value(&tuple)?;
            let sum = groups.entry(tuple.project(&self.group_indices)).or_insert(0);
            *sum = sum
                .checked_add(value)
                .ok_or_else(|| ExecutorError::aggregate_overflow(&self.aggregate))?;
        }

        Ok(groups
            .into_iter()
            .map(|(key, sum)| {
                let mut fields = key.into_fields();
                fields.push(Constant::Integer(sum));
                Tuple::new(fields)
            })
            .collect())
    }
}

impl Operator for SumOperator {
    fn next_tuple(&mut self) -> ExecutorResult<Option<Tuple>> {
        if self.output.is_none() {
            self.output = Some(self.drain()?);
        }
        Ok(self.output.as_mut().and_then(VecDeque::pop_front))
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.output = None;
        self.child.reset()
    }

    fn schema(&self) -> &RelationalAtom {
        &self.schema
    }

    fn label(&self) -> String {
        let group = &self.schema.terms()[..self.group_indices.len()];
        if group.is_empty() {
            return format!("Sum {}", self.aggregate);
        }
        let vars: Vec<String> = group.iter().map(|t| t.to_string()).collect();
        format!("Sum {} group by [{}]", self.aggregate, vars.join(", "))
    }

    fn children(&self) -> Vec<&dyn Operator> {
        vec![self.child.as_ref()]
    }
}
