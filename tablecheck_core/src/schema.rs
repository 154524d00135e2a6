//! Schema types for describing a multi-table dataset.
//!
//! A `Schema` is pure configuration: required columns and their types,
//! per-column format validators, enumerated value sets, and cross-table
//! foreign-key references. It is loaded once and treated as an immutable
//! value for the duration of a validation run.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declared scalar type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Losslessly parseable as a signed 64-bit integer
    Int,
    /// Parseable as a 64-bit float (integer-looking input accepted)
    Float,
    /// Any raw value, including the empty string
    Str,
    /// ISO 8601 calendar date, `YYYY-MM-DD`
    Date,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "int",
            ColumnType::Float => "float",
            ColumnType::Str => "str",
            ColumnType::Date => "date",
        };
        f.write_str(name)
    }
}

/// Per-column piece of a table schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Declared scalar type
    pub column_type: ColumnType,

    /// Optional format validator name (e.g. "email"), applied after type
    /// coercion. Names are checked against the format registry when the
    /// schema is resolved, before any row is read.
    pub format: Option<String>,
}

/// A cross-table column reference, written `table.column` in the schema
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ForeignKeyRef {
    /// Referenced table name
    pub table: String,
    /// Referenced column name
    pub column: String,
}

impl FromStr for ForeignKeyRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((table, column)) if !table.is_empty() && !column.is_empty() => {
                Ok(ForeignKeyRef {
                    table: table.to_string(),
                    column: column.to_string(),
                })
            }
            _ => Err(format!(
                "expected 'table.column', got '{s}'"
            )),
        }
    }
}

impl fmt::Display for ForeignKeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Validation rules for a single table.
///
/// Column order follows the declaration order of the schema document and
/// drives the order of findings in the report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableSpec {
    /// Table name
    pub name: String,

    /// Required columns, in declaration order
    pub columns: IndexMap<String, ColumnSpec>,

    /// Enumerated value constraints: column name -> allowed string values
    pub enums: IndexMap<String, Vec<String>>,

    /// Foreign keys: source column name -> referenced table.column
    pub foreign_keys: IndexMap<String, ForeignKeyRef>,
}

impl TableSpec {
    /// Creates an empty table spec with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns true if `column` is declared in `required_columns`.
    pub fn declares(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }
}

/// A complete dataset schema: ordered mapping from table name to
/// [`TableSpec`]. Table names are unique by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    tables: IndexMap<String, TableSpec>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a schema from table specs, keyed by their names.
    ///
    /// Later specs with a duplicate name replace earlier ones; parsers are
    /// expected to reject duplicates before this point.
    pub fn from_tables(tables: impl IntoIterator<Item = TableSpec>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    /// Looks up a table spec by name.
    pub fn table(&self, name: &str) -> Option<&TableSpec> {
        self.tables.get(name)
    }

    /// Iterates table specs in declaration order.
    pub fn tables(&self) -> impl Iterator<Item = &TableSpec> {
        self.tables.values()
    }

    /// Iterates table names in declaration order.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Number of tables in the schema.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the schema declares no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
