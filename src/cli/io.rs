//! File output for CLI commands
//!
//! - Result files: one tuple per line, truncated on open
//! - Query files: the rule text followed by one newline

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::executor::{ExecutorError, ExecutorResult, Tuple, TupleSink};
use crate::query::Query;

use super::errors::{CliError, CliResult};

/// Buffered result file writer
pub struct ResultWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    written: usize,
}

impl ResultWriter {
    /// Creates or truncates `path`
    pub fn create(path: &Path) -> CliResult<Self> {
        let file = File::create(path).map_err(|e| CliError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes buffered lines and returns the number of tuples written
    pub fn finish(mut self) -> CliResult<usize> {
        self.writer.flush().map_err(|e| CliError::io(&self.path, e))?;
        Ok(self.written)
    }
}

impl TupleSink for ResultWriter {
    fn accept(&mut self, tuple: &Tuple) -> ExecutorResult<()> {
        writeln!(self.writer, "{}", tuple).map_err(|e| {
            ExecutorError::sink_failed(format!("{}: {}", self.path.display(), e))
        })?;
        self.written += 1;
        Ok(())
    }
}

/// Writes `query` in rule notation with one trailing newline
pub fn write_query_file(path: &Path, query: &Query) -> CliResult<()> {
    fs::write(path, format!("{}\n", query)).map_err(|e| CliError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{parse_query, Constant};
    use tempfile::TempDir;

    #[test]
    fn test_result_writer_lines() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.csv");
        fs::write(&path, "stale\ncontent\n").unwrap();

        let mut writer = ResultWriter::create(&path).unwrap();
        writer
            .accept(&Tuple::new(vec![Constant::Integer(1), Constant::from("a")]))
            .unwrap();
        writer.accept(&Tuple::new(vec![Constant::Integer(3)])).unwrap();
        assert_eq!(writer.written(), 2);
        assert_eq!(writer.finish().unwrap(), 2);

        assert_eq!(fs::read_to_string(&path).unwrap(), "1,'a'\n3\n");
    }

    #[test]
    fn test_write_query_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("q.txt");
        let query = parse_query("Q(x)  :-  R(x,y),S(y, 'k')").unwrap();
        write_query_file(&path, &query).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Q(x) :- R(x, y), S(y, 'k')\n"
        );
    }

    #[test]
    fn test_create_in_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let err = ResultWriter::create(&tmp.path().join("nope").join("out.csv"))
            .err()
            .unwrap();
        assert_eq!(err.stage(), "io");
    }
}
