//! Integration tests for the validation engine.
//!
//! End-to-end scenarios over a realistic three-table dataset: attorneys,
//! the pro bono cases they take, and the time entries logged against those
//! cases.

use tablecheck_core::{ColumnType, RuleKind, Schema, SchemaBuilder, TableSpecBuilder};
use tablecheck_validator::{DatasetValidator, MemorySource, Row, row};

fn pro_bono_schema() -> Schema {
    SchemaBuilder::new()
        .table(
            TableSpecBuilder::new("attorneys")
                .column("attorney_id", ColumnType::Int)
                .column("name", ColumnType::Str)
                .column("email", ColumnType::Str)
                .column("bar_date", ColumnType::Date)
                .format("email", "email")
                .build(),
        )
        .table(
            TableSpecBuilder::new("pro_bono_cases")
                .column("case_id", ColumnType::Int)
                .column("attorney_id", ColumnType::Int)
                .column("status", ColumnType::Str)
                .column("opened", ColumnType::Date)
                .allowed_values("status", ["open", "closed", "pending"])
                .foreign_key("attorney_id", "attorneys", "attorney_id")
                .build(),
        )
        .table(
            TableSpecBuilder::new("time_entries")
                .column("entry_id", ColumnType::Int)
                .column("case_id", ColumnType::Int)
                .column("attorney_id", ColumnType::Int)
                .column("hours", ColumnType::Float)
                .column("entry_date", ColumnType::Date)
                .foreign_key("case_id", "pro_bono_cases", "case_id")
                .foreign_key("attorney_id", "attorneys", "attorney_id")
                .build(),
        )
        .build()
}

fn attorneys_rows() -> Vec<Row> {
    vec![
        row([
            ("attorney_id", "1"),
            ("name", "Jane Doe"),
            ("email", "jane@firm.com"),
            ("bar_date", "2015-06-01"),
        ]),
        row([
            ("attorney_id", "2"),
            ("name", "Raj Patel"),
            ("email", "raj@firm.com"),
            ("bar_date", "2019-11-12"),
        ]),
    ]
}

fn cases_rows() -> Vec<Row> {
    vec![
        row([
            ("case_id", "10"),
            ("attorney_id", "1"),
            ("status", "open"),
            ("opened", "2024-01-15"),
        ]),
        row([
            ("case_id", "11"),
            ("attorney_id", "2"),
            ("status", "closed"),
            ("opened", "2024-02-29"),
        ]),
    ]
}

fn time_entries_rows() -> Vec<Row> {
    vec![
        row([
            ("entry_id", "100"),
            ("case_id", "10"),
            ("attorney_id", "1"),
            ("hours", "2.5"),
            ("entry_date", "2024-01-16"),
        ]),
        row([
            ("entry_id", "101"),
            ("case_id", "11"),
            ("attorney_id", "2"),
            ("hours", "4"),
            ("entry_date", "2024-03-01"),
        ]),
    ]
}

fn clean_source() -> MemorySource {
    MemorySource::new()
        .with_table("attorneys", attorneys_rows())
        .with_table("pro_bono_cases", cases_rows())
        .with_table("time_entries", time_entries_rows())
}

#[test]
fn test_clean_dataset_passes() {
    let report = DatasetValidator::new()
        .validate(&pro_bono_schema(), &clean_source())
        .unwrap();

    assert!(
        report.is_empty(),
        "expected a clean run, got findings: {:?}",
        report.findings()
    );
}

#[test]
fn test_every_defect_is_reported() {
    let mut dirty = attorneys_rows();
    dirty.push(row([
        ("attorney_id", "three"),       // type_mismatch
        ("name", ""),                   // missing_required
        ("email", "nope"),              // format_invalid
        ("bar_date", "2021-02-30"),     // format_invalid (invalid calendar date)
    ]));
    let source = MemorySource::new()
        .with_table("attorneys", dirty)
        .with_table("pro_bono_cases", cases_rows())
        .with_table("time_entries", time_entries_rows());

    let report = DatasetValidator::new()
        .validate(&pro_bono_schema(), &source)
        .unwrap();

    assert_eq!(report.len(), 4);
    assert!(report.findings().iter().all(|f| f.table == "attorneys"));
    assert!(report.findings().iter().all(|f| f.row == 2));

    let rules: Vec<RuleKind> = report.findings().iter().map(|f| f.rule).collect();
    assert_eq!(
        rules,
        vec![
            RuleKind::TypeMismatch,
            RuleKind::MissingRequired,
            RuleKind::FormatInvalid,
            RuleKind::FormatInvalid,
        ]
    );
}

#[test]
fn test_dangling_references_across_tables() {
    let mut entries = time_entries_rows();
    entries.push(row([
        ("entry_id", "102"),
        ("case_id", "99"),      // no such case
        ("attorney_id", "77"),  // no such attorney
        ("hours", "1"),
        ("entry_date", "2024-03-02"),
    ]));
    let source = MemorySource::new()
        .with_table("attorneys", attorneys_rows())
        .with_table("pro_bono_cases", cases_rows())
        .with_table("time_entries", entries);

    let report = DatasetValidator::new()
        .validate(&pro_bono_schema(), &source)
        .unwrap();

    assert_eq!(report.len(), 2);
    for finding in report.findings() {
        assert_eq!(finding.rule, RuleKind::ForeignKeyViolation);
        assert_eq!(finding.table, "time_entries");
        assert_eq!(finding.row, 2);
    }
    assert!(report.findings()[0].message.contains("pro_bono_cases.case_id"));
    assert!(report.findings()[1].message.contains("attorneys.attorney_id"));
}

#[test]
fn test_row_defects_do_not_mask_foreign_key_checks() {
    // A case row with a bad status still has its attorney_id checked.
    let mut cases = cases_rows();
    cases.push(row([
        ("case_id", "12"),
        ("attorney_id", "42"),
        ("status", "archived"),
        ("opened", "2024-03-10"),
    ]));
    let source = MemorySource::new()
        .with_table("attorneys", attorneys_rows())
        .with_table("pro_bono_cases", cases)
        .with_table("time_entries", time_entries_rows());

    let report = DatasetValidator::new()
        .validate(&pro_bono_schema(), &source)
        .unwrap();

    let rules: Vec<RuleKind> = report.findings().iter().map(|f| f.rule).collect();
    assert_eq!(
        rules,
        vec![RuleKind::EnumViolation, RuleKind::ForeignKeyViolation]
    );
}

#[test]
fn test_duplicate_case_id_is_reported() {
    let mut cases = cases_rows();
    cases.push(row([
        ("case_id", "10"),
        ("attorney_id", "2"),
        ("status", "pending"),
        ("opened", "2024-03-01"),
    ]));
    let source = MemorySource::new()
        .with_table("attorneys", attorneys_rows())
        .with_table("pro_bono_cases", cases)
        .with_table("time_entries", time_entries_rows());

    let report = DatasetValidator::new()
        .validate(&pro_bono_schema(), &source)
        .unwrap();

    assert_eq!(report.len(), 1);
    let finding = &report.findings()[0];
    assert_eq!(finding.rule, RuleKind::DuplicateKey);
    assert_eq!(finding.table, "pro_bono_cases");
    assert_eq!(finding.column, "case_id");
    assert_eq!(finding.row, 2);
}

#[test]
fn test_summary_counts() {
    let mut cases = cases_rows();
    cases.push(row([
        ("case_id", "x"),
        ("attorney_id", "1"),
        ("status", "open"),
        ("opened", "2024-03-10"),
    ]));
    let mut entries = time_entries_rows();
    entries.push(row([
        ("entry_id", "102"),
        ("case_id", "10"),
        ("attorney_id", "9"),
        ("hours", "1.0"),
        ("entry_date", "2024-03-11"),
    ]));
    let source = MemorySource::new()
        .with_table("attorneys", attorneys_rows())
        .with_table("pro_bono_cases", cases)
        .with_table("time_entries", entries);

    let report = DatasetValidator::new()
        .validate(&pro_bono_schema(), &source)
        .unwrap();

    let by_table = report.summary_by_table();
    assert_eq!(by_table.get("pro_bono_cases"), Some(&1));
    assert_eq!(by_table.get("time_entries"), Some(&1));
    assert_eq!(by_table.get("attorneys"), None);

    let by_rule = report.summary_by_rule();
    assert_eq!(by_rule.get(&RuleKind::TypeMismatch), Some(&1));
    assert_eq!(by_rule.get(&RuleKind::ForeignKeyViolation), Some(&1));
}
