//! Pull-based operator protocol
//!
//! Operators form a tree; each node exclusively owns its children.
//! Evaluation is synchronous: calling `next_tuple` on the root pulls
//! through the whole tree until a tuple is produced or the tree is exhausted.

use crate::query::RelationalAtom;

use super::errors::ExecutorResult;
use super::tuple::Tuple;

/// A lazy, restartable tuple producer
pub trait Operator {
    /// Next output tuple, or `None` once exhausted.
    ///
    /// Keeps returning `None` after exhaustion until `reset`.
    fn next_tuple(&mut self) -> ExecutorResult<Option<Tuple>>;

    /// Rewinds so the next pass reproduces the sequence of a fresh instance.
    /// Resets children recursively.
    fn reset(&mut self) -> ExecutorResult<()>;

    /// Positional layout of emitted tuples
    fn schema(&self) -> &RelationalAtom;

    /// One-line description used by EXPLAIN
    fn label(&self) -> String;

    /// Child operators, outer first
    fn children(&self) -> Vec<&dyn Operator>;

    /// Drains every remaining tuple into `sink`. Returns the number written.
    fn dump(&mut self, sink: &mut dyn TupleSink) -> ExecutorResult<usize> {
        let mut written = 0;
        while let Some(tuple) = self.next_tuple()? {
            sink.accept(&tuple)?;
            written += 1;
        }
        Ok(written)
    }
}

impl std::fmt::Debug for dyn Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// Destination for emitted tuples
pub trait TupleSink {
    fn accept(&mut self, tuple: &Tuple) -> ExecutorResult<()>;
}

/// Sink collecting tuples in memory
#[derive(Debug, Default)]
pub struct CollectSink {
    tuples: Vec<Tuple>,
}

impl CollectSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tuples(&self) -> &[Tuple] {
        &self.tuples
    }

    pub fn into_tuples(self) -> Vec<Tuple> {
        self.tuples
    }
}

impl TupleSink for CollectSink {
    fn accept(&mut self, tuple: &Tuple) -> ExecutorResult<()> {
        self.tuples.push(tuple.clone());
        Ok(())
    }
}

/// Pulls `op` to exhaustion and returns every tuple
pub fn collect_all(op: &mut dyn Operator) -> ExecutorResult<Vec<Tuple>> {
    let mut sink = CollectSink::new();
    op.dump(&mut sink)?;
    Ok(sink.into_tuples())
}
