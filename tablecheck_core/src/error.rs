//! Schema-level errors.
//!
//! These indicate a broken configuration, not bad data. They are fatal and
//! abort a validation run before any row is judged; data defects are
//! reported as [`Finding`](crate::Finding)s instead.

use thiserror::Error;

/// Result type for schema resolution and graph construction.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Fatal configuration defect in a schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Format validator name not present in the registry
    #[error("unknown format validator '{format}' on column '{table}.{column}'")]
    UnknownFormat {
        table: String,
        column: String,
        format: String,
    },

    /// Enum constraint on a column not declared in required_columns
    #[error("enum constraint on undeclared column '{table}.{column}'")]
    EnumOnUndeclaredColumn { table: String, column: String },

    /// Foreign key on a column not declared in required_columns
    #[error("foreign key on undeclared column '{table}.{column}'")]
    ForeignKeyOnUndeclaredColumn { table: String, column: String },

    /// Foreign key referencing a table that does not exist
    #[error(
        "foreign key '{table}.{column}' references unknown table '{target_table}'"
    )]
    UnknownForeignKeyTable {
        table: String,
        column: String,
        target_table: String,
    },

    /// Foreign key referencing a column not declared in the target table
    #[error(
        "foreign key '{table}.{column}' references unknown column '{target_table}.{target_column}'"
    )]
    UnknownForeignKeyColumn {
        table: String,
        column: String,
        target_table: String,
        target_column: String,
    },

    /// Cycle among foreign-key references; validation order is undefined
    #[error("foreign-key cycle involving table '{table}'")]
    ForeignKeyCycle { table: String },
}
