use anyhow::{Context, Result};
use std::path::Path;
use tablecheck_parser::parse_file;
use tablecheck_validator::{ForeignKeyGraph, FormatRegistry, resolve};
use tracing::info;

use crate::output;

pub fn execute(schema_path: &str) -> Result<()> {
    info!("Checking schema: {}", schema_path);

    let schema = parse_file(Path::new(schema_path))
        .with_context(|| format!("Failed to parse schema file: {schema_path}"))?;

    // Run the same pre-row checks the engine runs: format names must be
    // registered, enums and foreign keys must sit on declared columns,
    // and the foreign-key graph must be closed and acyclic.
    let registry = FormatRegistry::with_builtins();
    for spec in schema.tables() {
        resolve(spec, &registry)
            .with_context(|| format!("Table '{}' failed schema checks", spec.name))?;
    }
    let graph = ForeignKeyGraph::build(&schema).context("Foreign-key graph is invalid")?;

    output::print_success("Schema is valid");

    println!("\nSchema Summary:");
    println!("  Tables:       {}", schema.len());
    println!("  Foreign keys: {}", graph.edges().len());
    for spec in schema.tables() {
        println!(
            "  - {} ({} columns, {} enums, {} foreign keys)",
            spec.name,
            spec.columns.len(),
            spec.enums.len(),
            spec.foreign_keys.len()
        );
    }

    if !graph.edges().is_empty() {
        println!(
            "\nValidation order: {}",
            graph.validation_order().join(" -> ")
        );
    }

    Ok(())
}
