//! Database catalog loaded from a database directory
//!
//! Layout:
//! - `<db>/<schema_file>`: one `NAME type type ...` line per relation
//! - `<db>/<data_dir>/<NAME>.<data_extension>`: comma-separated rows
//!
//! A missing or malformed schema file is fatal.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{CatalogError, CatalogResult};
use super::types::{ColumnType, RelationSchema};

/// File names used inside a database directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    pub schema_file: String,
    pub data_dir: String,
    pub data_extension: String,
}

impl Default for CatalogLayout {
    fn default() -> Self {
        Self {
            schema_file: "schema.txt".to_string(),
            data_dir: "files".to_string(),
            data_extension: "csv".to_string(),
        }
    }
}

/// Read-only relation catalog for one database directory
#[derive(Debug, Clone)]
pub struct DatabaseCatalog {
    root: PathBuf,
    layout: CatalogLayout,
    relations: HashMap<String, RelationSchema>,
}

impl DatabaseCatalog {
    /// Loads the schema file of `root` using the default layout
    pub fn load(root: &Path) -> CatalogResult<Self> {
        Self::load_with_layout(root, CatalogLayout::default())
    }

    /// Loads the schema file of `root` using an explicit layout
    pub fn load_with_layout(root: &Path, layout: CatalogLayout) -> CatalogResult<Self> {
        let schema_path = root.join(&layout.schema_file);
        let content = fs::read_to_string(&schema_path).map_err(|e| {
            CatalogError::unreadable(schema_path.display().to_string(), e.to_string())
        })?;

        let mut catalog = Self {
            root: root.to_path_buf(),
            layout,
            relations: HashMap::new(),
        };
        for (idx, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let schema = Self::parse_schema_line(idx + 1, line)?;
            catalog.insert(idx + 1, schema)?;
        }

        Ok(catalog)
    }

    /// Builds a catalog from already-known schemas (no schema file read).
    pub fn from_relations(
        root: &Path,
        layout: CatalogLayout,
        relations: impl IntoIterator<Item = RelationSchema>,
    ) -> CatalogResult<Self> {
        let mut catalog = Self {
            root: root.to_path_buf(),
            layout,
            relations: HashMap::new(),
        };
        for (idx, schema) in relations.into_iter().enumerate() {
            catalog.insert(idx + 1, schema)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, line: usize, schema: RelationSchema) -> CatalogResult<()> {
        if self.relations.contains_key(&schema.name) {
            return Err(CatalogError::duplicate_relation(line, &schema.name));
        }
        self.relations.insert(schema.name.clone(), schema);
        Ok(())
    }

    fn parse_schema_line(line_no: usize, line: &str) -> CatalogResult<RelationSchema> {
        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| CatalogError::malformed(line_no, "Missing relation name"))?;

        let columns = parts
            .map(|part| {
                part.parse::<ColumnType>()
                    .map_err(|bad| CatalogError::unknown_type(line_no, bad))
            })
            .collect::<CatalogResult<Vec<_>>>()?;

        if columns.is_empty() {
            return Err(CatalogError::malformed(
                line_no,
                format!("Relation '{}' declares no columns", name),
            ));
        }

        Ok(RelationSchema::new(name, columns))
    }

    /// Database directory this catalog describes
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, name: &str) -> Option<&RelationSchema> {
        self.relations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.relations.contains_key(name)
    }

    /// Relation names in lexicographic order
    pub fn relation_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.relations.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Path of the backing file of a relation
    pub fn relation_path(&self, name: &str) -> PathBuf {
        self.root
            .join(&self.layout.data_dir)
            .join(format!("{}.{}", name, self.layout.data_extension))
    }
}
