//! Project: narrows tuples to target variables with duplicate elimination
//!
//! Field indices are resolved once, at construction. Emitted tuples are
//! remembered for the current pass; `reset` forgets them.

use std::collections::HashSet;

use crate::query::{RelationalAtom, Term, Variable};

use super::errors::{ExecutorError, ExecutorResult};
use super::operator::Operator;
use super::tuple::Tuple;

pub struct ProjectOperator {
    child: Box<dyn Operator>,
    schema: RelationalAtom,
    indices: Vec<usize>,
    seen: HashSet<Tuple>,
}

impl ProjectOperator {
    /// Projects `child` onto `targets`, in order. A target may repeat.
    pub fn new(child: Box<dyn Operator>, targets: &[Variable]) -> ExecutorResult<Self> {
        let source = child.schema();
        let indices = targets
            .iter()
            .map(|v| {
                source
                    .position_of(v)
                    .ok_or_else(|| ExecutorError::term_unresolved(v, source))
            })
            .collect::<ExecutorResult<Vec<_>>>()?;
        let schema = RelationalAtom::new(
            "Project",
            targets.iter().cloned().map(Term::Variable).collect(),
        );

        Ok(Self {
            child,
            schema,
            indices,
            seen: HashSet::new(),
        })
    }
}

impl Operator for ProjectOperator {
    fn next_tuple(&mut self) -> ExecutorResult<Option<Tuple>> {
        while let Some(tuple) = self.child.next_tuple()? {
            let projected = tuple.project(&self.indices);
            if !self.seen.contains(&projected) {
                self.seen.insert(projected.clone());
                return Ok(Some(projected));
            }
        }
        Ok(None)
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.seen.clear();
        self.child.reset()
    }

    fn schema(&self) -> &RelationalAtom {
        &self.schema
    }

    fn label(&self) -> String {
        let vars: Vec<String> = self.schema.terms().iter().map(|t| t.to_string()).collect();
        format!("Project [{}]", vars.join(", "))
    }

    fn children(&self) -> Vec<&dyn Operator> {
        vec![self.child.as_ref()]
    }
}
