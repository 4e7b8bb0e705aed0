//! CLI command implementations
//!
//! Each command runs its stages in strict order and stops at the first
//! failure:
//! - evaluate: parse, load catalog, plan, write results
//! - minimize: parse, minimize, write query
//! - explain: parse, load catalog, plan, render

use std::path::Path;

use crate::catalog::DatabaseCatalog;
use crate::executor::Operator;
use crate::minimizer::minimize;
use crate::observability::{log_event_with_fields, Event, Logger, ObservationScope, Severity};
use crate::planner::{ExplainPlan, QueryPlanner};
use crate::query::{parse_query_file, Query};

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{write_query_file, ResultWriter};

/// Dispatches a parsed command line
pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = Config::resolve(cli.config.as_deref())?;
    let mut severity = config.severity()?;
    if cli.verbose {
        severity = severity.min(Severity::Info);
    }
    Logger::set_min_severity(severity);
    log_event_with_fields(Event::ConfigLoaded, &[("log_level", severity.as_str())]);

    match cli.command {
        Command::Evaluate {
            database_dir,
            input_file,
            output_file,
        } => evaluate(&config, &database_dir, &input_file, &output_file).map(|_| ()),
        Command::Minimize {
            input_file,
            output_file,
        } => minimize_file(&input_file, &output_file).map(|_| ()),
        Command::Explain {
            database_dir,
            input_file,
        } => {
            let plan = explain(&config, &database_dir, &input_file)?;
            print!("{}", plan);
            Ok(())
        }
    }
}

/// Runs `scope` around `body`, completing or failing it by outcome
fn observed<T>(
    scope: ObservationScope<'_>,
    body: impl FnOnce() -> CliResult<T>,
    summary: impl FnOnce(&T) -> String,
) -> CliResult<T> {
    match body() {
        Ok(value) => {
            let detail = summary(&value);
            scope.complete_with_fields(&[("result", detail.as_str())]);
            Ok(value)
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e)
        }
    }
}

fn load_query(input: &Path) -> CliResult<Query> {
    let query = parse_query_file(input)?;
    let atoms = query.body().len().to_string();
    log_event_with_fields(
        Event::QueryParsed,
        &[("atoms", atoms.as_str()), ("query", query.to_string().as_str())],
    );
    Ok(query)
}

fn load_catalog(config: &Config, database_dir: &Path) -> CliResult<DatabaseCatalog> {
    let catalog = DatabaseCatalog::load_with_layout(database_dir, config.layout())?;
    let relations = catalog.len().to_string();
    log_event_with_fields(Event::CatalogLoaded, &[("relations", relations.as_str())]);
    Ok(catalog)
}

fn plan_query(catalog: &DatabaseCatalog, query: &Query) -> CliResult<Box<dyn Operator>> {
    let root = QueryPlanner::new(catalog).plan(query)?;
    log_event_with_fields(Event::QueryPlanned, &[("root", root.label().as_str())]);
    Ok(root)
}

/// Evaluates the query in `input` and writes result tuples to `output`.
///
/// Returns the number of tuples written.
pub fn evaluate(
    config: &Config,
    database_dir: &Path,
    input: &Path,
    output: &Path,
) -> CliResult<usize> {
    let input_name = input.display().to_string();
    let scope = ObservationScope::with_fields("EVALUATE", &[("input", input_name.as_str())]);

    observed(
        scope,
        || {
            let query = load_query(input)?;
            let catalog = load_catalog(config, database_dir)?;
            let mut root = plan_query(&catalog, &query)?;

            let mut writer = ResultWriter::create(output)?;
            root.dump(&mut writer)?;
            let written = writer.finish()?;

            let tuples = written.to_string();
            log_event_with_fields(Event::QueryComplete, &[("tuples", tuples.as_str())]);
            Ok(written)
        },
        |written| format!("{} tuples", written),
    )
}

/// Minimizes the query in `input` and writes it to `output`
pub fn minimize_file(input: &Path, output: &Path) -> CliResult<Query> {
    let input_name = input.display().to_string();
    let scope = ObservationScope::with_fields("MINIMIZE", &[("input", input_name.as_str())]);

    observed(
        scope,
        || {
            let query = load_query(input)?;
            let minimized = minimize(&query)?;
            write_query_file(output, &minimized)?;

            let before = query.body().len().to_string();
            let after = minimized.body().len().to_string();
            log_event_with_fields(
                Event::MinimizeComplete,
                &[("atoms_after", after.as_str()), ("atoms_before", before.as_str())],
            );
            Ok(minimized)
        },
        |minimized| minimized.to_string(),
    )
}

/// Plans the query in `input` without reading any tuple
pub fn explain(config: &Config, database_dir: &Path, input: &Path) -> CliResult<ExplainPlan> {
    let query = load_query(input)?;
    let catalog = load_catalog(config, database_dir)?;
    let root = plan_query(&catalog, &query)?;
    let plan = ExplainPlan::from_operator(&query, root.as_ref());

    let operators = plan.operator_count().to_string();
    log_event_with_fields(Event::ExplainComplete, &[("operators", operators.as_str())]);
    Ok(plan)
}

/// Logs a rejected command
pub fn report_failure(err: &CliError) {
    let reason = err.to_string();
    log_event_with_fields(
        Event::QueryRejected,
        &[("reason", reason.as_str()), ("stage", err.stage())],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn database(tmp: &TempDir) -> std::path::PathBuf {
        let db = tmp.path().join("db");
        fs::create_dir_all(db.join("files")).unwrap();
        fs::write(db.join("schema.txt"), "R int int\nS string\n").unwrap();
        fs::write(db.join("files").join("R.csv"), "1,2\n3,4\n1,4\n").unwrap();
        fs::write(db.join("files").join("S.csv"), "'a'\n'b'\n").unwrap();
        db
    }

    fn query_file(tmp: &TempDir, text: &str) -> std::path::PathBuf {
        let path = tmp.path().join("query.txt");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_evaluate_writes_results() {
        let tmp = TempDir::new().unwrap();
        let db = database(&tmp);
        let input = query_file(&tmp, "Q(x) :- R(x, y)\n");
        let output = tmp.path().join("out.csv");

        let written = evaluate(&Config::default(), &db, &input, &output).unwrap();
        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "1\n3\n");
    }

    #[test]
    fn test_evaluate_reports_stage() {
        let tmp = TempDir::new().unwrap();
        let db = database(&tmp);
        let output = tmp.path().join("out.csv");

        let input = query_file(&tmp, "Q(x) :- ");
        let err = evaluate(&Config::default(), &db, &input, &output).unwrap_err();
        assert_eq!(err.stage(), "parse");

        let input = query_file(&tmp, "Q(x) :- T(x)");
        let err = evaluate(&Config::default(), &db, &input, &output).unwrap_err();
        assert_eq!(err.stage(), "plan");

        let err = evaluate(&Config::default(), &tmp.path().join("none"), &input, &output)
            .unwrap_err();
        assert_eq!(err.stage(), "catalog");
    }

    #[test]
    fn test_evaluate_data_error_is_execute_stage() {
        let tmp = TempDir::new().unwrap();
        let db = database(&tmp);
        fs::write(db.join("files").join("R.csv"), "1,2\n3,x\n").unwrap();
        let input = query_file(&tmp, "Q(x) :- R(x, y)");
        let output = tmp.path().join("out.csv");

        let err = evaluate(&Config::default(), &db, &input, &output).unwrap_err();
        assert_eq!(err.stage(), "execute");
    }

    #[test]
    fn test_minimize_file() {
        let tmp = TempDir::new().unwrap();
        let input = query_file(&tmp, "Q(x) :- R(x, y), R(x, z)");
        let output = tmp.path().join("min.txt");

        let minimized = minimize_file(&input, &output).unwrap();
        assert_eq!(minimized.body().len(), 1);
        assert_eq!(fs::read_to_string(&output).unwrap(), "Q(x) :- R(x, z)\n");
    }

    #[test]
    fn test_explain_does_not_need_output() {
        let tmp = TempDir::new().unwrap();
        let db = database(&tmp);
        let input = query_file(&tmp, "Q(x, s) :- R(x, y), S(s)");
        let plan = explain(&Config::default(), &db, &input).unwrap();
        assert!(plan.to_string().starts_with("=== EXPLAIN PLAN ==="));
        assert_eq!(plan.nodes[0].label, "Project [x, s]");
    }
}
