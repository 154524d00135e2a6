use colored::*;
use serde_json::json;
use tablecheck_core::ValidationReport;

pub fn print_validation_report(report: &ValidationReport, format: &str) {
    match format {
        "json" => print_json_report(report),
        _ => print_text_report(report),
    }
}

fn print_text_report(report: &ValidationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.is_empty() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );

        for (table, findings) in report.by_table() {
            println!(
                "\n{}",
                format!("{table} ({} findings):", findings.len()).bold()
            );
            for (i, finding) in findings.iter().enumerate() {
                println!(
                    "  {}. row {}, {}: {} [{}]",
                    i + 1,
                    finding.row,
                    finding.column,
                    finding.message.red(),
                    finding.rule.to_string().yellow()
                );
            }
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total findings: {}", report.len());
    for (rule, count) in report.summary_by_rule() {
        println!("  {rule}: {count}");
    }
    println!("{}", "═".repeat(60));
}

fn print_json_report(report: &ValidationReport) {
    let by_rule: std::collections::BTreeMap<String, usize> = report
        .summary_by_rule()
        .into_iter()
        .map(|(rule, count)| (rule.to_string(), count))
        .collect();

    let output = json!({
        "passed": report.is_empty(),
        "findings": report.findings(),
        "summary": {
            "total": report.len(),
            "by_table": report.summary_by_table(),
            "by_rule": by_rule,
        }
    });

    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
