//! Dataset validation orchestrator.
//!
//! Runs the full pipeline over a schema and a table source: resolve every
//! table's column rules, build and validate the foreign-key graph, load
//! all rows, validate tables (in parallel — each table depends only on its
//! own rules), then check key integrity — duplicate values in referenced
//! key columns, and foreign-key membership against fully materialized key
//! sets. Findings are merged in a deterministic order regardless of how
//! the parallel work was scheduled.

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use tablecheck_core::{Finding, RuleKind, Schema, ValidationReport};
use tracing::{debug, info};

use crate::error::ValidateError;
use crate::fkgraph::{ForeignKeyEdge, ForeignKeyGraph};
use crate::resolve::{ResolvedTable, resolve};
use crate::source::{Row, TableSource};
use crate::table::validate_table;
use crate::value::FormatRegistry;

/// The validation engine.
///
/// Owns the format registry; the schema is borrowed read-only for the
/// duration of a run and never mutated.
///
/// # Example
///
/// ```rust
/// use tablecheck_core::{ColumnType, SchemaBuilder, TableSpecBuilder};
/// use tablecheck_validator::{DatasetValidator, MemorySource, row};
///
/// let schema = SchemaBuilder::new()
///     .table(
///         TableSpecBuilder::new("attorneys")
///             .column("attorney_id", ColumnType::Int)
///             .build(),
///     )
///     .build();
///
/// let source = MemorySource::new()
///     .with_table("attorneys", vec![row([("attorney_id", "1")])]);
///
/// let report = DatasetValidator::new().validate(&schema, &source).unwrap();
/// assert!(report.is_empty());
/// ```
pub struct DatasetValidator {
    registry: FormatRegistry,
}

impl DatasetValidator {
    /// Creates an engine with the built-in format registry.
    pub fn new() -> Self {
        Self {
            registry: FormatRegistry::with_builtins(),
        }
    }

    /// Validates a dataset against a schema.
    ///
    /// Returns `Err` only for configuration or source failures, always
    /// before any row is judged. A completed run returns a report whose
    /// empty finding list is the ordinary success value.
    ///
    /// Enum and foreign-key membership compare raw strings exactly: an
    /// int-typed key written `01` does not match the key `1`.
    pub fn validate(
        &self,
        schema: &Schema,
        source: &dyn TableSource,
    ) -> Result<ValidationReport, ValidateError> {
        // Phase 1: resolve column rules for every table (fail fast).
        let resolved: Vec<ResolvedTable> = schema
            .tables()
            .map(|spec| resolve(spec, &self.registry))
            .collect::<Result<_, _>>()?;

        // Phase 2: build the foreign-key graph (fail fast on dangling
        // references or cycles).
        let graph = ForeignKeyGraph::build(schema)?;
        debug!(
            tables = schema.len(),
            fk_edges = graph.edges().len(),
            order = ?graph.validation_order(),
            "schema resolved"
        );

        // Phase 3: load all rows up front. Key sets for every referenced
        // table must exist before the foreign-key phase, independent of
        // declaration order.
        let mut data: HashMap<String, Vec<Row>> = HashMap::with_capacity(schema.len());
        for name in schema.table_names() {
            let rows = source.rows(name)?;
            info!(table = name, rows = rows.len(), "table loaded");
            data.insert(name.to_string(), rows);
        }

        // Phase 4: per-table row validation. Tables are independent, so
        // they run in parallel; collect() keeps the declared table order,
        // which keeps the merged report deterministic.
        let per_table: Vec<Vec<Finding>> = resolved
            .par_iter()
            .map(|table| validate_table(table, &data[&table.table]))
            .collect();

        let mut report = ValidationReport::new();
        for findings in per_table {
            report.extend(findings);
        }

        // Phase 5: key integrity. Key sets first; a repeated value in a
        // referenced key column is a finding of its own.
        let (key_sets, duplicates) = materialize_key_sets(&graph, &data);
        report.extend(duplicates);
        let table_names: Vec<&str> = schema.table_names().collect();
        let fk_findings: Vec<Vec<Finding>> = table_names
            .par_iter()
            .map(|&table| check_foreign_keys(table, &graph, &data[table], &key_sets))
            .collect();
        for findings in fk_findings {
            report.extend(findings);
        }

        info!(findings = report.len(), "validation complete");
        Ok(report)
    }
}

impl Default for DatasetValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Collects the distinct values of every foreign-key target column,
/// reporting repeated values as `duplicate_key` findings. Lookups during
/// the check phase are read-only.
fn materialize_key_sets(
    graph: &ForeignKeyGraph,
    data: &HashMap<String, Vec<Row>>,
) -> (HashMap<(String, String), HashSet<String>>, Vec<Finding>) {
    let mut key_sets = HashMap::new();
    let mut findings = Vec::new();
    for (table, column) in graph.referenced_columns() {
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        for (row_idx, row) in data[&table].iter().enumerate() {
            let Some(value) = row.get(&column).filter(|v| !v.is_empty()) else {
                continue;
            };
            match first_seen.get(value.as_str()) {
                Some(first) => findings.push(Finding::new(
                    table.as_str(),
                    row_idx,
                    column.as_str(),
                    RuleKind::DuplicateKey,
                    format!("key value '{value}' duplicates row {first}"),
                )),
                None => {
                    first_seen.insert(value, row_idx);
                }
            }
        }
        let keys: HashSet<String> = first_seen.keys().map(|k| k.to_string()).collect();
        key_sets.insert((table, column), keys);
    }
    (key_sets, findings)
}

/// Checks every foreign-key edge out of one table. Missing or empty
/// source values are skipped here; they already produced a
/// `missing_required` finding in the row phase.
fn check_foreign_keys(
    table: &str,
    graph: &ForeignKeyGraph,
    rows: &[Row],
    key_sets: &HashMap<(String, String), HashSet<String>>,
) -> Vec<Finding> {
    let edges: Vec<(&ForeignKeyEdge, &HashSet<String>)> = graph
        .edges_from(table)
        .map(|edge| {
            let keys = &key_sets[&(edge.target_table.clone(), edge.target_column.clone())];
            (edge, keys)
        })
        .collect();
    if edges.is_empty() {
        return Vec::new();
    }

    let mut findings = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        for (edge, keys) in &edges {
            let Some(value) = row.get(&edge.source_column).filter(|v| !v.is_empty()) else {
                continue;
            };
            if !keys.contains(value) {
                findings.push(Finding::new(
                    table,
                    row_idx,
                    &edge.source_column,
                    RuleKind::ForeignKeyViolation,
                    format!(
                        "value '{value}' not found in {}.{}",
                        edge.target_table, edge.target_column
                    ),
                ));
            }
        }
    }
    findings
}
