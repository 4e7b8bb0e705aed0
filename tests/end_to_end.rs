//! End-to-End Command Tests
//!
//! Runs the evaluate, minimize and explain commands against a database
//! directory built in a temp dir, and checks which stage reports each
//! kind of failure.

use std::fs;
use std::path::{Path, PathBuf};

use minibase::cli::{evaluate, explain, minimize_file, Config};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

/// Database with R(int, int), S(int, string) and T(int)
fn create_database() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("db");
    fs::create_dir_all(db.join("files")).unwrap();
    fs::write(db.join("schema.txt"), "R int int\nS int string\nT int\n").unwrap();
    fs::write(db.join("files/R.csv"), "1,2\n3,4\n1,4\n").unwrap();
    fs::write(db.join("files/S.csv"), "2,'b'\n4,'d'\n5,'e'\n").unwrap();
    fs::write(db.join("files/T.csv"), "4\n9\n").unwrap();
    (tmp, db)
}

/// Evaluates `query` and returns the output file content
fn run(tmp: &TempDir, db: &Path, query: &str) -> String {
    let input = tmp.path().join("query.txt");
    let output = tmp.path().join("output.csv");
    fs::write(&input, query).unwrap();
    evaluate(&Config::default(), db, &input, &output).unwrap();
    fs::read_to_string(&output).unwrap()
}

/// Evaluates `query` and returns the failing stage
fn failing_stage(tmp: &TempDir, db: &Path, query: &str) -> &'static str {
    let input = tmp.path().join("query.txt");
    let output = tmp.path().join("output.csv");
    fs::write(&input, query).unwrap();
    evaluate(&Config::default(), db, &input, &output)
        .unwrap_err()
        .stage()
}

fn sorted_lines(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = content.lines().collect();
    lines.sort_unstable();
    lines
}

// =============================================================================
// Evaluate
// =============================================================================

/// Q(x) :- R(x, y) writes each distinct x once.
#[test]
fn test_evaluate_projection() {
    let (tmp, db) = create_database();
    assert_eq!(run(&tmp, &db, "Q(x) :- R(x, y)"), "1\n3\n");
}

/// A natural join writes string constants in quotes.
#[test]
fn test_evaluate_join_with_strings() {
    let (tmp, db) = create_database();
    assert_eq!(
        run(&tmp, &db, "Q(x, z) :- R(x, y), S(y, z)"),
        "1,'b'\n3,'d'\n1,'d'\n"
    );
}

/// Constants and comparisons in the body filter rows.
#[test]
fn test_evaluate_selections() {
    let (tmp, db) = create_database();
    assert_eq!(run(&tmp, &db, "Q(y) :- R(x, y), x >= 3"), "4\n");
    assert_eq!(run(&tmp, &db, "Q(z) :- S(y, z), z = 'd'"), "'d'\n");
    assert_eq!(run(&tmp, &db, "Q(x) :- R(x, 4), T(4)"), "3\n1\n");
}

/// Comparing an int column with a string constant never matches.
#[test]
fn test_evaluate_cross_kind_comparison_is_false() {
    let (tmp, db) = create_database();
    assert_eq!(run(&tmp, &db, "Q(x) :- R(x, y), y != 'a'"), "");
    assert_eq!(run(&tmp, &db, "Q(x) :- R(x, y), y = 'a'"), "");
}

/// An empty result still creates an empty output file.
#[test]
fn test_evaluate_empty_result() {
    let (tmp, db) = create_database();
    fs::write(tmp.path().join("output.csv"), "stale\n").unwrap();
    assert_eq!(run(&tmp, &db, "Q(x) :- R(x, 9)"), "");
}

/// SUM with and without group variables.
#[test]
fn test_evaluate_sum() {
    let (tmp, db) = create_database();
    assert_eq!(run(&tmp, &db, "Q(SUM(y)) :- R(x, y)"), "10\n");
    assert_eq!(run(&tmp, &db, "Q(SUM(x)) :- R(x, 7)"), "0\n");

    let grouped = run(&tmp, &db, "Q(x, SUM(y)) :- R(x, y)");
    assert_eq!(sorted_lines(&grouped), vec!["1,6", "3,4"]);
}

/// A configured layout changes where relation files are looked up.
#[test]
fn test_evaluate_with_custom_layout() {
    let tmp = TempDir::new().unwrap();
    let db = tmp.path().join("db");
    fs::create_dir_all(db.join("data")).unwrap();
    fs::write(db.join("relations.txt"), "R int int\n").unwrap();
    fs::write(db.join("data/R.tsv"), "5,6\n").unwrap();

    let config = Config {
        schema_file: "relations.txt".to_string(),
        data_dir: "data".to_string(),
        data_extension: "tsv".to_string(),
        ..Config::default()
    };

    let input = tmp.path().join("query.txt");
    let output = tmp.path().join("output.csv");
    fs::write(&input, "Q(y) :- R(x, y)").unwrap();
    assert_eq!(evaluate(&config, &db, &input, &output).unwrap(), 1);
    assert_eq!(fs::read_to_string(&output).unwrap(), "6\n");
}

// =============================================================================
// Failure Stages
// =============================================================================

#[test]
fn test_parse_failures() {
    let (tmp, db) = create_database();
    assert_eq!(failing_stage(&tmp, &db, "Q(x) :- "), "parse");
    assert_eq!(failing_stage(&tmp, &db, "Q(x) R(x, y)"), "parse");
}

#[test]
fn test_plan_failures() {
    let (tmp, db) = create_database();
    assert_eq!(failing_stage(&tmp, &db, "Q(x) :- U(x)"), "plan");
    assert_eq!(failing_stage(&tmp, &db, "Q(x) :- R(x)"), "plan");
    assert_eq!(failing_stage(&tmp, &db, "Q(z) :- R(x, y)"), "plan");
}

#[test]
fn test_catalog_failure() {
    let (tmp, _db) = create_database();
    let missing = tmp.path().join("missing");
    assert_eq!(failing_stage(&tmp, &missing, "Q(x) :- R(x, y)"), "catalog");
}

/// Bad rows are found while tuples are pulled, not while planning.
#[test]
fn test_execute_failure() {
    let (tmp, db) = create_database();
    fs::write(db.join("files/R.csv"), "1,2\n3,'x'\n").unwrap();
    assert_eq!(failing_stage(&tmp, &db, "Q(x) :- R(x, y)"), "execute");
}

/// A failed plan leaves no output file behind.
#[test]
fn test_plan_failure_creates_no_output() {
    let (tmp, db) = create_database();
    assert_eq!(failing_stage(&tmp, &db, "Q(x) :- U(x)"), "plan");
    assert!(!tmp.path().join("output.csv").exists());
}

// =============================================================================
// Minimize and Explain
// =============================================================================

#[test]
fn test_minimize_command_writes_rule() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("query.txt");
    let output = tmp.path().join("minimized.txt");
    fs::write(&input, "Q(x) :- R(x, y), R(x, y), S(x)\n").unwrap();

    minimize_file(&input, &output).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), "Q(x) :- R(x, y), S(x)\n");
}

#[test]
fn test_minimize_command_rejects_comparisons() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("query.txt");
    let output = tmp.path().join("minimized.txt");
    fs::write(&input, "Q(x) :- R(x, y), x < 3").unwrap();

    let err = minimize_file(&input, &output).unwrap_err();
    assert_eq!(err.stage(), "minimize");
    assert!(!output.exists());
}

#[test]
fn test_explain_lists_operators() {
    let (tmp, db) = create_database();
    let input = tmp.path().join("query.txt");
    fs::write(&input, "Q(x, z) :- R(x, y), S(y, z)").unwrap();

    let rendered = explain(&Config::default(), &db, &input).unwrap().to_string();
    assert!(rendered.starts_with("=== EXPLAIN PLAN ==="));
    assert!(rendered.contains("Join on y = y"));
    assert!(rendered.contains("Scan R(x, y)"));
    assert!(rendered.contains("Scan S(y, z)"));
}
