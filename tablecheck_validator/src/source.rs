//! Table data sources.
//!
//! The engine does not know or care about file formats; it pulls rows per
//! declared table through the [`TableSource`] trait. Rows carry raw string
//! values — type coercion is the validator's job.

use std::collections::HashMap;

use indexmap::IndexMap;
use thiserror::Error;

/// One row of raw data: ordered mapping from column name to raw value.
pub type Row = IndexMap<String, String>;

/// Errors a table source can produce.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No data supplied for a declared table
    #[error("no data supplied for table '{0}'")]
    MissingTable(String),

    /// Reading the table's data failed
    #[error("failed to read table '{table}': {message}")]
    Read { table: String, message: String },
}

/// Supplies rows for the tables a schema declares.
pub trait TableSource: Sync {
    /// Returns all rows of the named table, in file order.
    fn rows(&self, table: &str) -> Result<Vec<Row>, SourceError>;
}

/// In-memory table source for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<String, Vec<Row>>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a table's rows.
    pub fn insert(&mut self, table: impl Into<String>, rows: Vec<Row>) {
        self.tables.insert(table.into(), rows);
    }

    /// Builder-style variant of [`MemorySource::insert`].
    pub fn with_table(mut self, table: impl Into<String>, rows: Vec<Row>) -> Self {
        self.insert(table, rows);
        self
    }
}

impl TableSource for MemorySource {
    fn rows(&self, table: &str) -> Result<Vec<Row>, SourceError> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| SourceError::MissingTable(table.to_string()))
    }
}

/// Convenience constructor for a row from (column, value) pairs.
pub fn row<const N: usize>(pairs: [(&str, &str); N]) -> Row {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
