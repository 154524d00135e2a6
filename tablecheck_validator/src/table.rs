//! Row-level table validation.
//!
//! Walks a table's rows against its resolved column rules, emitting one
//! finding per violation. Validation is total: it never stops at the first
//! violation within a row or across rows, so the report surfaces every
//! defect in one pass.

use tablecheck_core::{ColumnType, Finding, RuleKind};
use tracing::debug;

use crate::resolve::ResolvedTable;
use crate::source::Row;
use crate::value::coerce;

/// Validates a table's rows against its resolved rules.
///
/// Findings come out in a fixed order: rows in file order, columns in
/// declaration order, and for a single value the format and enum checks
/// each contribute independently.
pub fn validate_table(resolved: &ResolvedTable, rows: &[Row]) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (row_idx, row) in rows.iter().enumerate() {
        for rule in &resolved.rules {
            let raw = match row.get(&rule.name) {
                Some(value) if !value.is_empty() => value,
                _ => {
                    findings.push(Finding::new(
                        &resolved.table,
                        row_idx,
                        &rule.name,
                        RuleKind::MissingRequired,
                        format!("required column '{}' is missing or empty", rule.name),
                    ));
                    continue;
                }
            };

            let typed = match coerce(raw, rule.column_type) {
                Ok(typed) => typed,
                Err(err) => {
                    // Dates carry a single canonical form; any date parse
                    // failure is a format failure, not a type failure.
                    let kind = match rule.column_type {
                        ColumnType::Date => RuleKind::FormatInvalid,
                        _ => RuleKind::TypeMismatch,
                    };
                    findings.push(Finding::new(
                        &resolved.table,
                        row_idx,
                        &rule.name,
                        kind,
                        err.to_string(),
                    ));
                    continue;
                }
            };

            if let Some(format) = &rule.format {
                if !(format.check)(&typed) {
                    findings.push(Finding::new(
                        &resolved.table,
                        row_idx,
                        &rule.name,
                        RuleKind::FormatInvalid,
                        format!("value '{raw}' fails format '{}'", format.name),
                    ));
                }
            }

            if let Some(allowed) = &rule.allowed {
                if !allowed.iter().any(|a| a == raw) {
                    findings.push(Finding::new(
                        &resolved.table,
                        row_idx,
                        &rule.name,
                        RuleKind::EnumViolation,
                        format!(
                            "value '{raw}' not in allowed set {{{}}}",
                            allowed.join(", ")
                        ),
                    ));
                }
            }
        }
    }

    debug!(
        table = %resolved.table,
        rows = rows.len(),
        findings = findings.len(),
        "table validated"
    );
    findings
}
