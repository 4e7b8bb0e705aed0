//! Query AST: head, optional SUM aggregate, and body
//!
//! Values are immutable once built; rewrites produce new queries.

use std::fmt;

use super::atom::{Atom, ComparisonAtom, RelationalAtom};
use super::term::{Term, Variable};

/// `SUM(t1 * t2 * ...)` over variables and integer constants
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SumAggregate {
    product_terms: Vec<Term>,
}

impl SumAggregate {
    pub fn new(product_terms: Vec<Term>) -> Self {
        Self { product_terms }
    }

    pub fn product_terms(&self) -> &[Term] {
        &self.product_terms
    }

    /// Distinct variables used by the product
    pub fn variables(&self) -> Vec<&Variable> {
        let mut vars: Vec<&Variable> = Vec::new();
        for v in self.product_terms.iter().filter_map(Term::as_variable) {
            if !vars.contains(&v) {
                vars.push(v);
            }
        }
        vars
    }
}

impl fmt::Display for SumAggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SUM(")?;
        for (i, term) in self.product_terms.iter().enumerate() {
            if i > 0 {
                f.write_str(" * ")?;
            }
            write!(f, "{}", term)?;
        }
        f.write_str(")")
    }
}

/// Query head: name, output variables (order and duplicates kept), optional SUM
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Head {
    name: String,
    variables: Vec<Variable>,
    sum: Option<SumAggregate>,
}

impl Head {
    pub fn new(name: impl Into<String>, variables: Vec<Variable>) -> Self {
        Self {
            name: name.into(),
            variables,
            sum: None,
        }
    }

    /// Attaches a SUM aggregate
    pub fn with_sum(mut self, sum: SumAggregate) -> Self {
        self.sum = Some(sum);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn sum(&self) -> Option<&SumAggregate> {
        self.sum.as_ref()
    }

    /// Variables that a homomorphism must leave fixed: outputs plus aggregate inputs
    pub fn distinguished(&self) -> Vec<&Variable> {
        let mut vars: Vec<&Variable> = Vec::new();
        let agg_vars = self.sum.iter().flat_map(|s| s.variables());
        for v in self.variables.iter().chain(agg_vars) {
            if !vars.contains(&v) {
                vars.push(v);
            }
        }
        vars
    }
}

impl fmt::Display for Head {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        let mut first = true;
        for v in &self.variables {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{}", v)?;
        }
        if let Some(sum) = &self.sum {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{}", sum)?;
        }
        f.write_str(")")
    }
}

/// A single-rule conjunctive query `Head :- Body`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    head: Head,
    body: Vec<Atom>,
}

impl Query {
    pub fn new(head: Head, body: Vec<Atom>) -> Self {
        Self { head, body }
    }

    pub fn head(&self) -> &Head {
        &self.head
    }

    pub fn body(&self) -> &[Atom] {
        &self.body
    }

    /// Relational atoms in body order
    pub fn relational_atoms(&self) -> impl Iterator<Item = &RelationalAtom> {
        self.body.iter().filter_map(Atom::as_relational)
    }

    /// Comparison atoms in body order
    pub fn comparison_atoms(&self) -> impl Iterator<Item = &ComparisonAtom> {
        self.body.iter().filter_map(Atom::as_comparison)
    }

    pub fn has_comparisons(&self) -> bool {
        self.comparison_atoms().next().is_some()
    }

    /// Returns a new query with the body atom at `index` removed
    pub fn without_atom(&self, index: usize) -> Self {
        let body = self
            .body
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, a)| a.clone())
            .collect();
        Self {
            head: self.head.clone(),
            body,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :- ", self.head)?;
        for (i, atom) in self.body.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", atom)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::atom::ComparisonOp;

    fn sample() -> Query {
        let head = Head::new("Q", vec![Variable::new("x")])
            .with_sum(SumAggregate::new(vec![Term::var("y"), Term::int(2)]));
        Query::new(
            head,
            vec![
                RelationalAtom::new("R", vec![Term::var("x"), Term::var("y")]).into(),
                ComparisonAtom::new(Term::var("x"), ComparisonOp::Lt, Term::int(5)).into(),
            ],
        )
    }

    #[test]
    fn test_query_display() {
        assert_eq!(
            sample().to_string(),
            "Q(x, SUM(y * 2)) :- R(x, y), x < 5"
        );
    }

    #[test]
    fn test_without_atom_leaves_original_intact() {
        let q = sample();
        let smaller = q.without_atom(1);
        assert_eq!(q.body().len(), 2);
        assert_eq!(smaller.body().len(), 1);
        assert_eq!(smaller.head(), q.head());
        assert!(!smaller.has_comparisons());
    }

    #[test]
    fn test_distinguished_includes_aggregate_inputs() {
        let q = sample();
        let names: Vec<&str> = q.head().distinguished().iter().map(|v| v.name()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_head_without_variables() {
        let head = Head::new("Q", vec![]).with_sum(SumAggregate::new(vec![Term::var("x")]));
        assert_eq!(head.to_string(), "Q(SUM(x))");
    }
}
