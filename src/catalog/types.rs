//! Column types declared in the schema file
//!
//! Supported types:
//! - int: 64-bit signed integer
//! - string: single-quoted text

use std::fmt;
use std::str::FromStr;

/// Declared type of a relation column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Int,
    String,
}

impl ColumnType {
    /// Returns the type name used in schema files
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::String => "string",
        }
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(ColumnType::Int),
            "string" => Ok(ColumnType::String),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A relation's name and ordered column types
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationSchema {
    pub name: String,
    pub columns: Vec<ColumnType>,
}

impl RelationSchema {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnType>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    pub fn arity(&self) -> usize {
        self.columns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_types() {
        assert_eq!("int".parse::<ColumnType>(), Ok(ColumnType::Int));
        assert_eq!("string".parse::<ColumnType>(), Ok(ColumnType::String));
        assert_eq!("float".parse::<ColumnType>(), Err("float".to_string()));
        // type names are case-sensitive
        assert!("INT".parse::<ColumnType>().is_err());
    }
}
