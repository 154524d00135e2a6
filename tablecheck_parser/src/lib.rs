//! Parser for tablecheck schema documents (YAML).
//!
//! A schema document has one top-level entry per table:
//!
//! ```yaml
//! attorneys:
//!   required_columns:
//!     attorney_id: int
//!     email: str
//!   format_validations:
//!     email: email
//! pro_bono_cases:
//!   required_columns:
//!     case_id: int
//!     attorney_id: int
//!     status: str
//!   enum:
//!     status: [open, closed, pending]
//!   foreign_keys:
//!     attorney_id: attorneys.attorney_id
//! ```
//!
//! This crate handles the structural layer only: YAML syntax, known type
//! names, well-formed `table.column` references, and formats attached to
//! declared columns. Semantic cross-reference checks (format registry
//! membership, enum columns, foreign-key targets, cycles) belong to the
//! validation engine and also run before any row is read.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tablecheck_core::{ColumnSpec, ColumnType, ForeignKeyRef, Schema, TableSpec};
use thiserror::Error;

/// Errors that can occur while parsing a schema document.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("failed to parse schema YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// File I/O error
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Foreign-key reference not of the form `table.column`
    #[error("invalid foreign key on '{table}.{column}': {message}")]
    InvalidForeignKey {
        table: String,
        column: String,
        message: String,
    },

    /// Format validation attached to a column not in required_columns
    #[error("format validation on undeclared column '{table}.{column}'")]
    FormatOnUndeclaredColumn { table: String, column: String },

    /// Unsupported file extension
    #[error("unsupported schema file extension: {0}")]
    UnsupportedExtension(String),

    /// Missing file extension
    #[error("invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Raw, order-preserving shape of one table entry in the document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTableSpec {
    required_columns: IndexMap<String, ColumnType>,

    #[serde(default)]
    format_validations: IndexMap<String, String>,

    #[serde(default, rename = "enum")]
    enums: IndexMap<String, Vec<String>>,

    #[serde(default)]
    foreign_keys: IndexMap<String, String>,
}

/// Parses a schema from a YAML string.
///
/// Duplicate table names are rejected by the YAML layer (duplicate mapping
/// keys), upholding the schema's uniqueness invariant.
pub fn parse_yaml(content: &str) -> Result<Schema> {
    let raw: IndexMap<String, RawTableSpec> = serde_yaml_ng::from_str(content)?;

    let mut tables = Vec::with_capacity(raw.len());
    for (name, raw_table) in raw {
        tables.push(convert_table(name, raw_table)?);
    }
    Ok(Schema::from_tables(tables))
}

fn convert_table(name: String, raw: RawTableSpec) -> Result<TableSpec> {
    let mut spec = TableSpec::new(name);

    for (column, column_type) in raw.required_columns {
        spec.columns.insert(
            column,
            ColumnSpec {
                column_type,
                format: None,
            },
        );
    }

    for (column, format) in raw.format_validations {
        match spec.columns.get_mut(&column) {
            Some(column_spec) => column_spec.format = Some(format),
            None => {
                return Err(ParserError::FormatOnUndeclaredColumn {
                    table: spec.name,
                    column,
                });
            }
        }
    }

    spec.enums = raw.enums;

    for (column, reference) in raw.foreign_keys {
        let parsed: ForeignKeyRef =
            reference
                .parse()
                .map_err(|message| ParserError::InvalidForeignKey {
                    table: spec.name.clone(),
                    column: column.clone(),
                    message,
                })?;
        spec.foreign_keys.insert(column, parsed);
    }

    Ok(spec)
}

/// Parses a schema from a file. Only `.yml`/`.yaml` extensions are
/// accepted.
pub fn parse_file(path: &Path) -> Result<Schema> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => {}
        other => return Err(ParserError::UnsupportedExtension(other.to_string())),
    }

    let content = std::fs::read_to_string(path)?;
    parse_yaml(&content)
}
