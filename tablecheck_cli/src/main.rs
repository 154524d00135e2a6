mod commands;
mod csv_source;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tablecheck")]
#[command(version, about = "Schema-driven multi-table dataset validator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a dataset against a schema
    Validate {
        /// Path to the schema file (YAML)
        schema: String,

        /// Directory containing one CSV file per declared table
        #[arg(short, long)]
        data: String,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Check a schema without validating data
    Check {
        /// Path to the schema file (YAML)
        schema: String,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let result = match cli.command {
        Commands::Validate {
            schema,
            data,
            format,
        } => commands::validate::execute(&schema, &data, &format),

        Commands::Check { schema } => commands::check::execute(&schema),
    };

    // Exit code 2 marks a configuration or source failure, as opposed to
    // exit code 1 for a completed run that found data defects.
    if let Err(err) = result {
        output::print_error(&format!("Error: {err:#}"));
        std::process::exit(2);
    }
}
