//! Scan: leaf operator reading a relation's backing file
//!
//! Rows are decoded lazily, one per `next_tuple` call. Each field is
//! trimmed and decoded according to the declared column type:
//! - `int`: signed 64-bit integer
//! - `string`: must be single-quote delimited; quotes are stripped
//!
//! Blank lines are skipped. Any other malformed row is fatal.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use crate::catalog::{ColumnType, RelationSchema};
use crate::query::{Constant, RelationalAtom};

use super::errors::{ExecutorError, ExecutorResult};
use super::operator::Operator;
use super::tuple::Tuple;

/// Sequential reader over one relation file
pub struct ScanOperator {
    relation: RelationSchema,
    path: PathBuf,
    atom: RelationalAtom,
    lines: Lines<BufReader<File>>,
    /// 1-based number of the last line read
    row: usize,
}

impl ScanOperator {
    /// Opens `path` for reading. `atom` names the fields of each row.
    pub fn new(relation: RelationSchema, path: &Path, atom: RelationalAtom) -> ExecutorResult<Self> {
        let lines = open_lines(path)?;
        Ok(Self {
            relation,
            path: path.to_path_buf(),
            atom,
            lines,
            row: 0,
        })
    }
}

fn open_lines(path: &Path) -> ExecutorResult<Lines<BufReader<File>>> {
    let file = File::open(path)
        .map_err(|e| ExecutorError::relation_unavailable(path.display(), e.to_string()))?;
    Ok(BufReader::new(file).lines())
}

/// Decodes one raw row against the relation's column types
pub fn decode_row(relation: &RelationSchema, row: usize, line: &str) -> ExecutorResult<Tuple> {
    let raw: Vec<&str> = line.split(',').map(str::trim).collect();
    if raw.len() != relation.arity() {
        return Err(ExecutorError::arity_mismatch(
            &relation.name,
            row,
            relation.arity(),
            raw.len(),
        ));
    }

    let mut fields = Vec::with_capacity(raw.len());
    for (idx, (text, column)) in raw.iter().zip(&relation.columns).enumerate() {
        let value = match column {
            ColumnType::Int => text.parse::<i64>().map(Constant::Integer).map_err(|_| {
                ExecutorError::bad_field(
                    &relation.name,
                    row,
                    format!("field {} '{}' is not an int", idx + 1, text),
                )
            })?,
            ColumnType::String => {
                let inner = text
                    .strip_prefix('\'')
                    .and_then(|t| t.strip_suffix('\''))
                    .ok_or_else(|| {
                        ExecutorError::bad_field(
                            &relation.name,
                            row,
                            format!("field {} {} is not a quoted string", idx + 1, text),
                        )
                    })?;
                Constant::String(inner.to_string())
            }
        };
        fields.push(value);
    }
    Ok(Tuple::new(fields))
}

impl Operator for ScanOperator {
    fn next_tuple(&mut self) -> ExecutorResult<Option<Tuple>> {
        loop {
            let line = match self.lines.next() {
                None => return Ok(None),
                Some(line) => line.map_err(|e| {
                    ExecutorError::relation_unavailable(self.path.display(), e.to_string())
                })?,
            };
            self.row += 1;
            if line.trim().is_empty() {
                continue;
            }
            return decode_row(&self.relation, self.row, &line).map(Some);
        }
    }

    fn reset(&mut self) -> ExecutorResult<()> {
        self.lines = open_lines(&self.path)?;
        self.row = 0;
        Ok(())
    }

    fn schema(&self) -> &RelationalAtom {
        &self.atom
    }

    fn label(&self) -> String {
        format!("Scan {}", self.atom)
    }

    fn children(&self) -> Vec<&dyn Operator> {
        Vec::new()
    }
}
