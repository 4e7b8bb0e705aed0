//! Rule-based query planner
//!
//! Builds the operator tree bottom-up; a parent is constructed only once its
//! final children exist.
//!
//! Planning steps (strict order):
//! 1. Validate relations, arities and variable bindings
//! 2. One Scan per relational atom, wrapped in a Select when it carries
//!    constants, repeated variables or selection conditions
//! 3. Left-deep join tree in body order
//! 4. Projection pushdown below each join (skipped with an aggregate)
//! 5. Root: Sum grouped by the head variables, or Project onto them

use std::collections::HashSet;
use std::path::PathBuf;

use crate::catalog::{DatabaseCatalog, RelationSchema};
use crate::executor::{
    JoinOperator, Operator, ProjectOperator, ScanOperator, SelectOperator, SumOperator,
};
use crate::query::{ComparisonAtom, Query, RelationalAtom, Variable};

use super::errors::{PlannerError, PlannerResult};

/// Read-only relation lookup used by the planner
pub trait RelationCatalog {
    /// Declared schema of a relation
    fn relation(&self, name: &str) -> Option<&RelationSchema>;
    /// Backing file of a relation
    fn relation_path(&self, name: &str) -> PathBuf;
}

impl RelationCatalog for DatabaseCatalog {
    fn relation(&self, name: &str) -> Option<&RelationSchema> {
        self.get(name)
    }

    fn relation_path(&self, name: &str) -> PathBuf {
        DatabaseCatalog::relation_path(self, name)
    }
}

/// Comparison atoms split by where they are evaluated
#[derive(Debug)]
struct ConditionSplit {
    /// Per leaf, in body order
    selections: Vec<Vec<ComparisonAtom>>,
    /// Evaluated at the first join where they resolve across both sides
    joins: Vec<ComparisonAtom>,
}

/// Compiles queries into operator trees
pub struct QueryPlanner<'a, C: RelationCatalog> {
    catalog: &'a C,
}

impl<'a, C: RelationCatalog> QueryPlanner<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Plans `query`, returning the root operator.
    ///
    /// Files are opened here; no tuple is read.
    pub fn plan(&self, query: &Query) -> PlannerResult<Box<dyn Operator>> {
        let atoms: Vec<&RelationalAtom> = query.relational_atoms().collect();
        self.validate(query, &atoms)?;

        let split = Self::split_conditions(query, &atoms);
        let aggregate = query.head().sum();

        let mut leaves = Vec::with_capacity(atoms.len());
        for (atom, selections) in atoms.iter().zip(&split.selections) {
            leaves.push(self.build_leaf(atom, selections)?);
        }

        let mut leaves = leaves.into_iter();
        let mut root = leaves.next().ok_or_else(PlannerError::empty_body)?;
        let mut pending = split.joins;

        for (offset, inner) in leaves.enumerate() {
            let (applied, remaining): (Vec<_>, Vec<_>) = pending.into_iter().partition(|c| {
                JoinOperator::split_condition(c, root.schema(), inner.schema()).is_some()
            });

            let (outer, inner) = if aggregate.is_none() {
                let mut needed: HashSet<Variable> =
                    query.head().variables().iter().cloned().collect();
                needed.extend(
                    applied
                        .iter()
                        .chain(&remaining)
                        .flat_map(|c| c.variables())
                        .cloned(),
                );
                needed.extend(
                    root.schema()
                        .variables()
                        .into_iter()
                        .filter(|v| inner.schema().contains_variable(v))
                        .cloned(),
                );
                // leaves not yet joined; `offset + 2` skips the first leaf and `inner`
                needed.extend(
                    atoms
                        .iter()
                        .skip(offset + 2)
                        .flat_map(|a| a.variables())
                        .cloned(),
                );
                (Self::narrow(root, &needed)?, Self::narrow(inner, &needed)?)
            } else {
                (root, inner)
            };

            root = Box::new(JoinOperator::new(outer, inner, &applied));
            pending = remaining;
        }

        match aggregate {
            Some(sum) => {
                let op = SumOperator::new(root, query.head().variables(), sum)
                    .map_err(|e| PlannerError::operator_failed(format!("Sum {}", sum), e))?;
                Ok(Box::new(op))
            }
            None => {
                let op = ProjectOperator::new(root, query.head().variables())
                    .map_err(|e| PlannerError::operator_failed("root Project", e))?;
                Ok(Box::new(op))
            }
        }
    }

    fn validate(&self, query: &Query, atoms: &[&RelationalAtom]) -> PlannerResult<()> {
        if atoms.is_empty() {
            return Err(PlannerError::empty_body());
        }

        for atom in atoms {
            let schema = self
                .catalog
                .relation(atom.name())
                .ok_or_else(|| PlannerError::unknown_relation(atom.name()))?;
            if schema.arity() != atom.arity() {
                return Err(PlannerError::arity_mismatch(
                    atom.name(),
                    schema.arity(),
                    atom.arity(),
                ));
            }
        }

        let bound: HashSet<&Variable> = atoms.iter().flat_map(|a| a.variables()).collect();
        let head = query.head();

        if let Some(v) = head.variables().iter().find(|v| !bound.contains(v)) {
            return Err(PlannerError::unbound_variable(v, "head"));
        }
        if let Some(sum) = head.sum() {
            if let Some(v) = sum.variables().into_iter().find(|v| !bound.contains(v)) {
                return Err(PlannerError::unbound_variable(v, sum));
            }
        }
        for cmp in query.comparison_atoms() {
            if let Some(v) = cmp.variables().into_iter().find(|v| !bound.contains(v)) {
                return Err(PlannerError::unbound_variable(v, format!("'{}'", cmp)));
            }
        }

        Ok(())
    }

    /// A comparison is a selection if it is ground or some leaf binds all of
    /// its variables; otherwise it is a join condition.
    fn split_conditions(query: &Query, atoms: &[&RelationalAtom]) -> ConditionSplit {
        let mut split = ConditionSplit {
            selections: vec![Vec::new(); atoms.len()],
            joins: Vec::new(),
        };

        for cmp in query.comparison_atoms() {
            if cmp.is_ground() {
                // empty bodies are rejected by `validate` before this runs
                if let Some(first) = split.selections.first_mut() {
                    first.push(cmp.clone());
                }
                continue;
            }

            let vars = cmp.variables();
            let mut attached = false;
            for (idx, atom) in atoms.iter().enumerate() {
                if vars.iter().all(|v| atom.contains_variable(v)) {
                    split.selections[idx].push(cmp.clone());
                    attached = true;
                }
            }
            if !attached {
                split.joins.push(cmp.clone());
            }
        }

        split
    }

    fn build_leaf(
        &self,
        atom: &RelationalAtom,
        selections: &[ComparisonAtom],
    ) -> PlannerResult<Box<dyn Operator>> {
        let schema = self
            .catalog
            .relation(atom.name())
            .ok_or_else(|| PlannerError::unknown_relation(atom.name()))?;
        let path = self.catalog.relation_path(atom.name());

        let scan = ScanOperator::new(schema.clone(), &path, atom.clone())
            .map_err(|e| PlannerError::operator_failed(format!("Scan {}", atom), e))?;

        if !atom.has_constant() && !atom.has_repeated_variable() && selections.is_empty() {
            return Ok(Box::new(scan));
        }

        let select = SelectOperator::new(Box::new(scan), selections)
            .map_err(|e| PlannerError::operator_failed(format!("Select {}", atom), e))?;
        Ok(Box::new(select))
    }

    /// Wraps `op` in a Project keeping only `needed` variables, unless that
    /// would leave its schema unchanged.
    fn narrow(
        op: Box<dyn Operator>,
        needed: &HashSet<Variable>,
    ) -> PlannerResult<Box<dyn Operator>> {
        let targets: Vec<Variable> = op
            .schema()
            .variables()
            .into_iter()
            .filter(|v| needed.contains(*v))
            .cloned()
            .collect();

        if targets.len() == op.schema().arity() {
            return Ok(op);
        }

        let project = ProjectOperator::new(op, &targets)
            .map_err(|e| PlannerError::operator_failed("pushed-down Project", e))?;
        Ok(Box::new(project))
    }
}
