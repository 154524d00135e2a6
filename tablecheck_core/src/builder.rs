//! Builder pattern for constructing schemas in code.
//!
//! Schemas normally arrive from a parsed document; these builders give
//! tests and embedders a fluent way to construct the same structures.

use crate::{ColumnSpec, ColumnType, ForeignKeyRef, Schema, TableSpec};

/// Builder for a [`Schema`].
///
/// # Example
///
/// ```rust
/// use tablecheck_core::{ColumnType, SchemaBuilder, TableSpecBuilder};
///
/// let schema = SchemaBuilder::new()
///     .table(
///         TableSpecBuilder::new("attorneys")
///             .column("attorney_id", ColumnType::Int)
///             .column("email", ColumnType::Str)
///             .format("email", "email")
///             .build(),
///     )
///     .build();
///
/// assert_eq!(schema.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    tables: Vec<TableSpec>,
}

impl SchemaBuilder {
    /// Creates an empty schema builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a table spec. Declaration order is preserved.
    ///
    /// # Panics
    ///
    /// Panics if a table with the same name was already added.
    pub fn table(mut self, spec: TableSpec) -> Self {
        assert!(
            !self.tables.iter().any(|t| t.name == spec.name),
            "duplicate table '{}'",
            spec.name
        );
        self.tables.push(spec);
        self
    }

    /// Builds the schema.
    pub fn build(self) -> Schema {
        Schema::from_tables(self.tables)
    }
}

/// Builder for a [`TableSpec`].
#[derive(Debug)]
pub struct TableSpecBuilder {
    spec: TableSpec,
}

impl TableSpecBuilder {
    /// Creates a builder for the named table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            spec: TableSpec::new(name),
        }
    }

    /// Declares a required column with its type.
    pub fn column(mut self, name: impl Into<String>, column_type: ColumnType) -> Self {
        self.spec.columns.insert(
            name.into(),
            ColumnSpec {
                column_type,
                format: None,
            },
        );
        self
    }

    /// Attaches a format validator to an already-declared column.
    ///
    /// # Panics
    ///
    /// Panics if the column has not been declared.
    pub fn format(mut self, column: &str, format: impl Into<String>) -> Self {
        let spec = self
            .spec
            .columns
            .get_mut(column)
            .unwrap_or_else(|| panic!("column '{column}' not declared"));
        spec.format = Some(format.into());
        self
    }

    /// Constrains a column to an enumerated set of allowed values.
    pub fn allowed_values<I, S>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.spec.enums.insert(
            column.into(),
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Declares a foreign key from `column` to `target_table.target_column`.
    pub fn foreign_key(
        mut self,
        column: impl Into<String>,
        target_table: impl Into<String>,
        target_column: impl Into<String>,
    ) -> Self {
        self.spec.foreign_keys.insert(
            column.into(),
            ForeignKeyRef {
                table: target_table.into(),
                column: target_column.into(),
            },
        );
        self
    }

    /// Builds the table spec.
    pub fn build(self) -> TableSpec {
        self.spec
    }
}
