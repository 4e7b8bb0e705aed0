//! Explain output for operator trees
//!
//! Deterministic for a given query and catalog: one line per operator,
//! children indented below their parent, outer child first.

use std::fmt;

use crate::executor::Operator;
use crate::query::Query;

/// One rendered operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplainNode {
    pub depth: usize,
    pub label: String,
}

/// Explain plan output
#[derive(Debug, Clone)]
pub struct ExplainPlan {
    /// Query text the plan was built for
    pub query: String,
    /// Pre-order walk of the operator tree
    pub nodes: Vec<ExplainNode>,
}

impl ExplainPlan {
    /// Captures the shape of an already-built operator tree
    pub fn from_operator(query: &Query, root: &dyn Operator) -> Self {
        let mut nodes = Vec::new();
        Self::walk(root, 0, &mut nodes);
        Self {
            query: query.to_string(),
            nodes,
        }
    }

    fn walk(op: &dyn Operator, depth: usize, out: &mut Vec<ExplainNode>) {
        out.push(ExplainNode {
            depth,
            label: op.label(),
        });
        for child in op.children() {
            Self::walk(child, depth + 1, out);
        }
    }

    /// Number of operators in the tree
    pub fn operator_count(&self) -> usize {
        self.nodes.len()
    }
}

impl fmt::Display for ExplainPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== EXPLAIN PLAN ===")?;
        writeln!(f, "Query: {}", self.query)?;
        writeln!(f, "Operators:")?;
        for node in &self.nodes {
            writeln!(f, "{}{}", "  ".repeat(node.depth + 1), node.label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogLayout, ColumnType, DatabaseCatalog, RelationSchema};
    use crate::planner::QueryPlanner;
    use crate::query::parse_query;
    use std::fs;
    use tempfile::TempDir;

    fn catalog(tmp: &TempDir) -> DatabaseCatalog {
        let files = tmp.path().join("files");
        fs::create_dir_all(&files).unwrap();
        fs::write(files.join("R.csv"), "1,2\n").unwrap();
        fs::write(files.join("S.csv"), "2\n").unwrap();
        fs::write(files.join("T.csv"), "2,7\n").unwrap();
        DatabaseCatalog::from_relations(
            tmp.path(),
            CatalogLayout::default(),
            vec![
                RelationSchema::new("R", vec![ColumnType::Int, ColumnType::Int]),
                RelationSchema::new("S", vec![ColumnType::Int]),
                RelationSchema::new("T", vec![ColumnType::Int, ColumnType::Int]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_explain_join_plan() {
        let tmp = TempDir::new().unwrap();
        let catalog = catalog(&tmp);
        let query = parse_query("Q(x) :- R(x, y), S(y), x < 5").unwrap();
        let root = QueryPlanner::new(&catalog).plan(&query).unwrap();
        let plan = ExplainPlan::from_operator(&query, root.as_ref());

        let rendered = plan.to_string();
        let expected = "\
=== EXPLAIN PLAN ===
Query: Q(x) :- R(x, y), S(y), x < 5
Operators:
  Project [x]
    Join on y = y
      Select R(x, y) [x < 5]
        Scan R(x, y)
      Scan S(y)
";
        assert_eq!(rendered, expected);
        assert_eq!(plan.operator_count(), 5);
    }

    #[test]
    fn test_explain_aggregate_plan() {
        let tmp = TempDir::new().unwrap();
        let catalog = catalog(&tmp);
        let query = parse_query("Q(x, SUM(y)) :- R(x, y), R(x, 2)").unwrap();
        let root = QueryPlanner::new(&catalog).plan(&query).unwrap();
        let plan = ExplainPlan::from_operator(&query, root.as_ref());
        let labels: Vec<&str> = plan.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Sum SUM(y) group by [x]",
                "Join on x = x",
                "Scan R(x, y)",
                "Select R(x, 2)",
                "Scan R(x, 2)",
            ]
        );
    }

    fn labels(catalog: &DatabaseCatalog, text: &str) -> Vec<String> {
        let query = parse_query(text).unwrap();
        let root = QueryPlanner::new(catalog).plan(&query).unwrap();
        ExplainPlan::from_operator(&query, root.as_ref())
            .nodes
            .into_iter()
            .map(|n| n.label)
            .collect()
    }

    #[test]
    fn test_explain_shows_pushed_down_projection() {
        let tmp = TempDir::new().unwrap();
        let catalog = catalog(&tmp);
        // z is used nowhere else, so T is narrowed to its join column
        assert_eq!(
            labels(&catalog, "Q(x) :- R(x, y), T(y, z)"),
            vec![
                "Project [x]",
                "Join on y = y",
                "Scan R(x, y)",
                "Project [y]",
                "Scan T(y, z)",
            ]
        );
    }

    #[test]
    fn test_explain_aggregate_skips_pushdown() {
        let tmp = TempDir::new().unwrap();
        let catalog = catalog(&tmp);
        assert_eq!(
            labels(&catalog, "Q(x, SUM(z)) :- R(x, y), T(y, z)"),
            vec![
                "Sum SUM(z) group by [x]",
                "Join on y = y",
                "Scan R(x, y)",
                "Scan T(y, z)",
            ]
        );
    }
}
