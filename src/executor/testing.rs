//! In-memory operator for unit tests

use crate::query::{Constant, RelationalAtom};

use super::errors::ExecutorResult;
use super::operator::Operator;
use super::tuple::Tuple;

pub struct MemoryOperator {
    schema: RelationalAtom,
    rows: Vec<Tuple>,
    cursor: usize,
    pub resets: usize,
}

impl MemoryOperator {
    pub fn new(schema: RelationalAtom, rows: Vec<Tuple>) -> Self {
        Self {
            schema,
            rows,
            cursor: 0,
            resets: 0,
        }
    }

    pub fn ints(schema: RelationalAtom, rows: Vec<Vec<i64>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| Tuple::new(r.into_iter().map(Constant::Integer).collect()))
            .collect();
        Self::new(schema, rows)
    }
}

impl Operator for MemoryOperator {
    fn next_tuple(&mut self) -> ExecutorResult<Option<Tuple>> {
        let next = self.rows.get(self.cursor).cloned();
        if next.is_some() {
            self.cursor += 1;
        }
        Ok(next)
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.cursor = 0;
        self.resets += 1;
        Ok(())
    }

    fn schema(&self) -> &RelationalAtom {
        &self.schema
    }

    fn label(&self) -> String {
        format!("Memory {}", self.schema)
    }

    fn children(&self) -> Vec<&dyn Operator> {
        Vec::new()
    }
}
