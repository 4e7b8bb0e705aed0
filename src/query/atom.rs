//! Relational and comparison atoms

use std::fmt;

use super::term::{Term, Variable};

/// A relation name applied to an ordered list of terms.
///
/// Also used as the positional schema of tuples flowing through operators:
/// field `i` of a tuple carries the value bound to `terms[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelationalAtom {
    name: String,
    terms: Vec<Term>,
}

impl RelationalAtom {
    pub fn new(name: impl Into<String>, terms: Vec<Term>) -> Self {
        Self {
            name: name.into(),
            terms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn arity(&self) -> usize {
        self.terms.len()
    }

    /// Position of the first occurrence of `var`, if any
    pub fn position_of(&self, var: &Variable) -> Option<usize> {
        self.terms
            .iter()
            .position(|t| t.as_variable() == Some(var))
    }

    pub fn contains_variable(&self, var: &Variable) -> bool {
        self.position_of(var).is_some()
    }

    /// Distinct variables in first-occurrence order
    pub fn variables(&self) -> Vec<&Variable> {
        let mut vars: Vec<&Variable> = Vec::new();
        for v in self.terms.iter().filter_map(Term::as_variable) {
            if !vars.contains(&v) {
                vars.push(v);
            }
        }
        vars
    }

    pub fn has_constant(&self) -> bool {
        self.terms.iter().any(Term::is_constant)
    }

    /// True if some variable occurs at more than one position
    pub fn has_repeated_variable(&self) -> bool {
        let occurrences = self.terms.iter().filter(|t| t.is_variable()).count();
        occurrences != self.variables().len()
    }

    /// Returns a copy with every term rewritten by `f`
    pub fn map_terms(&self, f: impl Fn(&Term) -> Term) -> Self {
        Self {
            name: self.name.clone(),
            terms: self.terms.iter().map(f).collect(),
        }
    }
}

impl fmt::Display for RelationalAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", term)?;
        }
        f.write_str(")")
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,
}

impl ComparisonOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Neq => "!=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Leq => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Geq => ">=",
        }
    }

    /// The operator to use when the operands are swapped
    pub fn mirrored(&self) -> Self {
        match self {
            ComparisonOp::Eq => ComparisonOp::Eq,
            ComparisonOp::Neq => ComparisonOp::Neq,
            ComparisonOp::Lt => ComparisonOp::Gt,
            ComparisonOp::Leq => ComparisonOp::Geq,
            ComparisonOp::Gt => ComparisonOp::Lt,
            ComparisonOp::Geq => ComparisonOp::Leq,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `left op right`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComparisonAtom {
    pub left: Term,
    pub op: ComparisonOp,
    pub right: Term,
}

impl ComparisonAtom {
    pub fn new(left: Term, op: ComparisonOp, right: Term) -> Self {
        Self { left, op, right }
    }

    /// Same predicate with operands swapped
    pub fn mirrored(&self) -> Self {
        Self {
            left: self.right.clone(),
            op: self.op.mirrored(),
            right: self.left.clone(),
        }
    }

    /// Variables referenced by either operand
    pub fn variables(&self) -> Vec<&Variable> {
        let mut vars = Vec::new();
        if let Some(v) = self.left.as_variable() {
            vars.push(v);
        }
        if let Some(v) = self.right.as_variable() {
            if !vars.contains(&v) {
                vars.push(v);
            }
        }
        vars
    }

    /// Both operands are constants
    pub fn is_ground(&self) -> bool {
        self.left.is_constant() && self.right.is_constant()
    }
}

impl fmt::Display for ComparisonAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// A body atom
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    Relational(RelationalAtom),
    Comparison(ComparisonAtom),
}

impl Atom {
    pub fn as_relational(&self) -> Option<&RelationalAtom> {
        match self {
            Atom::Relational(a) => Some(a),
            Atom::Comparison(_) => None,
        }
    }

    pub fn as_comparison(&self) -> Option<&ComparisonAtom> {
        match self {
            Atom::Comparison(c) => Some(c),
            Atom::Relational(_) => None,
        }
    }
}

impl From<RelationalAtom> for Atom {
    fn from(a: RelationalAtom) -> Self {
        Atom::Relational(a)
    }
}

impl From<ComparisonAtom> for Atom {
    fn from(c: ComparisonAtom) -> Self {
        Atom::Comparison(c)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Relational(a) => a.fmt(f),
            Atom::Comparison(c) => c.fmt(f),
        }
    }
}
