//! Catalog error types
//!
//! Error codes:
//! - MINIBASE_CATALOG_UNREADABLE (FATAL)
//! - MINIBASE_CATALOG_MALFORMED (FATAL)
//! - MINIBASE_CATALOG_UNKNOWN_TYPE (FATAL)
//! - MINIBASE_CATALOG_DUPLICATE_RELATION (FATAL)

use std::fmt;

/// Catalog-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorCode {
    /// Schema file missing or unreadable
    CatalogUnreadable,
    /// Schema line without a relation name or columns
    CatalogMalformed,
    /// Column type other than `int` or `string`
    CatalogUnknownType,
    /// Relation declared twice
    CatalogDuplicateRelation,
}

impl CatalogErrorCode {
    /// Returns the stable string code
    pub fn code(&self) -> &'static str {
        match self {
            CatalogErrorCode::CatalogUnreadable => "MINIBASE_CATALOG_UNREADABLE",
            CatalogErrorCode::CatalogMalformed => "MINIBASE_CATALOG_MALFORMED",
            CatalogErrorCode::CatalogUnknownType => "MINIBASE_CATALOG_UNKNOWN_TYPE",
            CatalogErrorCode::CatalogDuplicateRelation => "MINIBASE_CATALOG_DUPLICATE_RELATION",
        }
    }
}

impl fmt::Display for CatalogErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Catalog error with context. All catalog errors abort before evaluation.
#[derive(Debug, Clone)]
pub struct CatalogError {
    code: CatalogErrorCode,
    message: String,
    /// 1-based schema file line, if applicable
    line: Option<usize>,
}

impl CatalogError {
    /// Schema file could not be read
    pub fn unreadable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: CatalogErrorCode::CatalogUnreadable,
            message: format!("Cannot read schema file {}: {}", path.into(), reason.into()),
            line: None,
        }
    }

    /// Schema line is structurally invalid
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self {
            code: CatalogErrorCode::CatalogMalformed,
            message: reason.into(),
            line: Some(line),
        }
    }

    /// Unsupported column type
    pub fn unknown_type(line: usize, type_name: impl Into<String>) -> Self {
        Self {
            code: CatalogErrorCode::CatalogUnknownType,
            message: format!(
                "Unknown column type '{}' (expected 'int' or 'string')",
                type_name.into()
            ),
            line: Some(line),
        }
    }

    /// Relation declared more than once
    pub fn duplicate_relation(line: usize, name: impl Into<String>) -> Self {
        Self {
            code: CatalogErrorCode::CatalogDuplicateRelation,
            message: format!("Relation '{}' is declared more than once", name.into()),
            line: Some(line),
        }
    }

    pub fn code(&self) -> CatalogErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[FATAL] {}: {}", self.code.code(), self.message)?;
        if let Some(line) = self.line {
            write!(f, " (schema line {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for CatalogError {}

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CatalogErrorCode::CatalogUnknownType.code(),
            "MINIBASE_CATALOG_UNKNOWN_TYPE"
        );
        assert_eq!(
            CatalogErrorCode::CatalogUnreadable.code(),
            "MINIBASE_CATALOG_UNREADABLE"
        );
    }

    #[test]
    fn test_error_display_includes_line() {
        let err = CatalogError::unknown_type(3, "float");
        let display = format!("{}", err);
        assert!(display.contains("FATAL"));
        assert!(display.contains("float"));
        assert!(display.contains("line 3"));
    }
}
