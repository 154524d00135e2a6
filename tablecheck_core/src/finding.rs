//! Findings and the validation report.
//!
//! A [`Finding`] is a single reported violation tied to a table, row, and
//! column. Findings are immutable value records: validators collect them
//! into a [`ValidationReport`] and never mutate them afterwards. An empty
//! report is the ordinary success value, not a distinguished sentinel.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

/// The kind of rule a finding violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// Required column absent from the row, or present with an empty value
    MissingRequired,
    /// Raw value could not be coerced to the declared column type
    TypeMismatch,
    /// Typed value rejected by the column's format validator
    FormatInvalid,
    /// Value not in the column's enumerated allowed set
    EnumViolation,
    /// Value absent from the referenced table's key column
    ForeignKeyViolation,
    /// Repeated value in a key column some foreign key references
    DuplicateKey,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleKind::MissingRequired => "missing_required",
            RuleKind::TypeMismatch => "type_mismatch",
            RuleKind::FormatInvalid => "format_invalid",
            RuleKind::EnumViolation => "enum_violation",
            RuleKind::ForeignKeyViolation => "foreign_key_violation",
            RuleKind::DuplicateKey => "duplicate_key",
        };
        f.write_str(name)
    }
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Table the violation occurred in
    pub table: String,

    /// Zero-based data row index, in file order
    pub row: usize,

    /// Offending column
    pub column: String,

    /// Violated rule kind
    pub rule: RuleKind,

    /// Human-readable description of the violation
    pub message: String,
}

impl Finding {
    /// Creates a new finding.
    pub fn new(
        table: impl Into<String>,
        row: usize,
        column: impl Into<String>,
        rule: RuleKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            row,
            column: column.into(),
            rule,
            message: message.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[row {}].{}: {} ({})",
            self.table, self.row, self.column, self.message, self.rule
        )
    }
}

/// The complete, ordered set of findings from one validation run.
///
/// Findings are appended in a deterministic order: tables in declared
/// order, rows in file order, columns in declaration order; duplicate-key
/// and then foreign-key findings follow the row-level findings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    findings: Vec<Finding>,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no findings were recorded (the success case).
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings.
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    /// All findings, in report order.
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Appends a finding.
    pub fn push(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    /// Appends a batch of findings, preserving their order.
    pub fn extend(&mut self, findings: impl IntoIterator<Item = Finding>) {
        self.findings.extend(findings);
    }

    /// Finding counts per table, keyed in first-seen (report) order.
    pub fn summary_by_table(&self) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for finding in &self.findings {
            *counts.entry(finding.table.clone()).or_default() += 1;
        }
        counts
    }

    /// Finding counts per rule kind.
    pub fn summary_by_rule(&self) -> BTreeMap<RuleKind, usize> {
        let mut counts: BTreeMap<RuleKind, usize> = BTreeMap::new();
        for finding in &self.findings {
            *counts.entry(finding.rule).or_default() += 1;
        }
        counts
    }

    /// Findings grouped by table, in first-seen order.
    pub fn by_table(&self) -> IndexMap<&str, Vec<&Finding>> {
        let mut grouped: IndexMap<&str, Vec<&Finding>> = IndexMap::new();
        for finding in &self.findings {
            grouped.entry(finding.table.as_str()).or_default().push(finding);
        }
        grouped
    }
}

impl FromIterator<Finding> for ValidationReport {
    fn from_iter<T: IntoIterator<Item = Finding>>(iter: T) -> Self {
        Self {
            findings: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn finding(table: &str, row: usize, column: &str, rule: RuleKind) -> Finding {
        Finding::new(table, row, column, rule, "test")
    }

    #[test]
    fn test_rule_kind_display() {
        assert_eq!(RuleKind::MissingRequired.to_string(), "missing_required");
        assert_eq!(RuleKind::TypeMismatch.to_string(), "type_mismatch");
        assert_eq!(RuleKind::FormatInvalid.to_string(), "format_invalid");
        assert_eq!(RuleKind::EnumViolation.to_string(), "enum_violation");
        assert_eq!(
            RuleKind::ForeignKeyViolation.to_string(),
            "foreign_key_violation"
        );
        assert_eq!(RuleKind::DuplicateKey.to_string(), "duplicate_key");
    }

    #[test]
    fn test_empty_report_is_success() {
        let report = ValidationReport::new();
        assert!(report.is_empty());
        assert_eq!(report.len(), 0);
        assert!(report.summary_by_table().is_empty());
    }

    #[test]
    fn test_summary_by_table() {
        let mut report = ValidationReport::new();
        report.push(finding("attorneys", 0, "email", RuleKind::FormatInvalid));
        report.push(finding("attorneys", 2, "email", RuleKind::FormatInvalid));
        report.push(finding("time_entries", 1, "hours", RuleKind::TypeMismatch));

        let summary = report.summary_by_table();
        assert_eq!(summary.get("attorneys"), Some(&2));
        assert_eq!(summary.get("time_entries"), Some(&1));
        // First-seen order preserved
        let keys: Vec<&String> = summary.keys().collect();
        assert_eq!(keys, vec!["attorneys", "time_entries"]);
    }

    #[test]
    fn test_summary_by_rule() {
        let mut report = ValidationReport::new();
        report.push(finding("a", 0, "x", RuleKind::TypeMismatch));
        report.push(finding("a", 1, "x", RuleKind::TypeMismatch));
        report.push(finding("b", 0, "y", RuleKind::EnumViolation));

        let summary = report.summary_by_rule();
        assert_eq!(summary.get(&RuleKind::TypeMismatch), Some(&2));
        assert_eq!(summary.get(&RuleKind::EnumViolation), Some(&1));
        assert_eq!(summary.get(&RuleKind::MissingRequired), None);
    }

    #[test]
    fn test_by_table_groups_in_order() {
        let mut report = ValidationReport::new();
        report.push(finding("attorneys", 0, "email", RuleKind::FormatInvalid));
        report.push(finding("time_entries", 0, "hours", RuleKind::TypeMismatch));
        report.push(finding("attorneys", 3, "email", RuleKind::FormatInvalid));

        let grouped = report.by_table();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["attorneys"].len(), 2);
        assert_eq!(grouped["time_entries"].len(), 1);
    }

    #[test]
    fn test_finding_display() {
        let f = Finding::new(
            "pro_bono_cases",
            4,
            "status",
            RuleKind::EnumViolation,
            "value 'archived' not in allowed set",
        );
        let rendered = f.to_string();
        assert!(rendered.contains("pro_bono_cases"));
        assert!(rendered.contains("row 4"));
        assert!(rendered.contains("enum_violation"));
    }
}
