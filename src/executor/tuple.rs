//! Tuples flowing through the operator tree

use std::fmt;

use crate::query::Constant;

/// Fixed-length sequence of constants. Equality and hashing are field-wise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tuple {
    fields: Vec<Constant>,
}

impl Tuple {
    pub fn new(fields: Vec<Constant>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[Constant] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&Constant> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields at `indices`, in that order
    pub fn project(&self, indices: &[usize]) -> Tuple {
        Tuple::new(indices.iter().map(|&i| self.fields[i].clone()).collect())
    }

    /// `self` fields followed by `other` fields
    pub fn concat(&self, other: &Tuple) -> Tuple {
        let mut fields = Vec::with_capacity(self.len() + other.len());
        fields.extend_from_slice(&self.fields);
        fields.extend_from_slice(&other.fields);
        Tuple::new(fields)
    }

    pub fn into_fields(self) -> Vec<Constant> {
        self.fields
    }
}

impl From<Vec<Constant>> for Tuple {
    fn from(fields: Vec<Constant>) -> Self {
        Tuple::new(fields)
    }
}

/// Result-line rendering: fields joined by `,`, strings single-quoted
impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", field)?;
        }
        Ok(())
    }
}
