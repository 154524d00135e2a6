use anyhow::{Context, Result};
use std::path::Path;
use tablecheck_parser::parse_file;
use tablecheck_validator::DatasetValidator;
use tracing::info;

use crate::csv_source::CsvTableSource;
use crate::output;

pub fn execute(schema_path: &str, data_dir: &str, format: &str) -> Result<()> {
    info!("Validating dataset in {} against {}", data_dir, schema_path);

    let schema = parse_file(Path::new(schema_path))
        .with_context(|| format!("Failed to parse schema file: {schema_path}"))?;

    if format != "json" {
        output::print_info(&format!(
            "Schema loaded: {} tables ({})",
            schema.len(),
            schema.table_names().collect::<Vec<_>>().join(", ")
        ));
    }

    let source = CsvTableSource::new(data_dir);
    let report = DatasetValidator::new()
        .validate(&schema, &source)
        .context("Validation aborted")?;

    output::print_validation_report(&report, format);

    if !report.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
