//! Terms: variables and typed constants
//!
//! Constants compare only against constants of the same kind. An integer
//! never equals, nor orders against, a string.

use std::cmp::Ordering;
use std::fmt;

/// A named query variable. Identity is the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable(String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A typed constant value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    /// 64-bit signed integer
    Integer(i64),
    /// Unquoted string value
    String(String),
}

impl Constant {
    /// Returns the integer value, if this is an integer constant
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Constant::Integer(v) => Some(*v),
            Constant::String(_) => None,
        }
    }

    /// Returns the kind name for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Constant::Integer(_) => "int",
            Constant::String(_) => "string",
        }
    }
}

impl PartialOrd for Constant {
    /// Same-kind constants order naturally; mixed kinds are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Constant::Integer(a), Constant::Integer(b)) => Some(a.cmp(b)),
            (Constant::String(a), Constant::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Integer(v) => write!(f, "{}", v),
            Constant::String(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<i64> for Constant {
    fn from(v: i64) -> Self {
        Constant::Integer(v)
    }
}

impl From<&str> for Constant {
    fn from(s: &str) -> Self {
        Constant::String(s.to_string())
    }
}

/// A term appearing in an atom
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(Variable),
    Constant(Constant),
}

impl Term {
    /// Shorthand for a variable term
    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(Variable::new(name))
    }

    /// Shorthand for an integer constant term
    pub fn int(value: i64) -> Self {
        Term::Constant(Constant::Integer(value))
    }

    /// Shorthand for a string constant term
    pub fn string(value: impl Into<String>) -> Self {
        Term::Constant(Constant::String(value.into()))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Term::Variable(v) => Some(v),
            Term::Constant(_) => None,
        }
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Term::Constant(c) => Some(c),
            Term::Variable(_) => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Term::Constant(_))
    }
}

impl From<Variable> for Term {
    fn from(v: Variable) -> Self {
        Term::Variable(v)
    }
}

impl From<Constant> for Term {
    fn from(c: Constant) -> Self {
        Term::Constant(c)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(v) => v.fmt(f),
            Term::Constant(c) => c.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_kind_constants_unordered() {
        let four = Constant::Integer(4);
        let text = Constant::from("4");
        assert_ne!(four, text);
        assert_eq!(four.partial_cmp(&text), None);
    }

    #[test]
    fn test_same_kind_ordering() {
        assert!(Constant::Integer(2) < Constant::Integer(3));
        assert!(Constant::from("abc") < Constant::from("abd"));
    }

    #[test]
    fn test_term_kind_distinguishes_equality() {
        // A constant 4 is not the variable named "4"
        assert_ne!(Term::int(4), Term::var("4"));
        assert_eq!(Term::var("x"), Term::Variable(Variable::new("x")));
    }

    #[test]
    fn test_display_quotes_strings() {
        assert_eq!(Term::string("ab").to_string(), "'ab'");
        assert_eq!(Term::int(-7).to_string(), "-7");
        assert_eq!(Term::var("z").to_string(), "z");
    }
}
