//! Schema catalog for minibase
//!
//! Maps relation names to ordered column types and locates each
//! relation's backing CSV file. Loaded once per evaluation and passed
//! by reference to the planner; there is no process-wide catalog.

mod errors;
mod loader;
mod types;

pub use errors::{CatalogError, CatalogErrorCode, CatalogResult};
pub use loader::{CatalogLayout, DatabaseCatalog};
pub use types::{ColumnType, RelationSchema};
