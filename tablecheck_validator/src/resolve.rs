//! Column spec resolution.
//!
//! Merges a table's required-column declarations, format validators, and
//! enum constraints into one per-column rule list. Resolution is static:
//! it runs once per schema load, is deterministic, and fails fast with a
//! [`SchemaError`] on configuration defects so that no row is ever judged
//! against a broken schema.

use tablecheck_core::{ColumnType, SchemaError, TableSpec};

use crate::value::{FormatCheck, FormatRegistry};

/// A format validator resolved from the registry, keeping its schema name
/// for messages.
#[derive(Clone)]
pub struct ResolvedFormat {
    pub name: String,
    pub check: FormatCheck,
}

impl std::fmt::Debug for ResolvedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFormat")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The complete rule set for one column: required presence, declared type,
/// optional format check, optional enum membership.
#[derive(Debug, Clone)]
pub struct ColumnRules {
    pub name: String,
    pub column_type: ColumnType,
    pub format: Option<ResolvedFormat>,
    pub allowed: Option<Vec<String>>,
}

/// Per-column rules for a table, in declaration order.
#[derive(Debug, Clone)]
pub struct ResolvedTable {
    pub table: String,
    pub rules: Vec<ColumnRules>,
}

/// Resolves a table spec against the format registry.
///
/// Schema-level failures: a format validator name the registry does not
/// know, an enum constraint on an undeclared column, or a foreign key on
/// an undeclared column (target existence is the graph's concern).
pub fn resolve(spec: &TableSpec, registry: &FormatRegistry) -> Result<ResolvedTable, SchemaError> {
    for column in spec.enums.keys() {
        if !spec.declares(column) {
            return Err(SchemaError::EnumOnUndeclaredColumn {
                table: spec.name.clone(),
                column: column.clone(),
            });
        }
    }

    for column in spec.foreign_keys.keys() {
        if !spec.declares(column) {
            return Err(SchemaError::ForeignKeyOnUndeclaredColumn {
                table: spec.name.clone(),
                column: column.clone(),
            });
        }
    }

    let mut rules = Vec::with_capacity(spec.columns.len());
    for (name, column_spec) in &spec.columns {
        let format = match &column_spec.format {
            Some(format_name) => match registry.get(format_name) {
                Some(check) => Some(ResolvedFormat {
                    name: format_name.clone(),
                    check,
                }),
                None => {
                    return Err(SchemaError::UnknownFormat {
                        table: spec.name.clone(),
                        column: name.clone(),
                        format: format_name.clone(),
                    });
                }
            },
            None => None,
        };

        rules.push(ColumnRules {
            name: name.clone(),
            column_type: column_spec.column_type,
            format,
            allowed: spec.enums.get(name).cloned(),
        });
    }

    Ok(ResolvedTable {
        table: spec.name.clone(),
        rules,
    })
}
