//! Assay CLI - statistical profiling for sensor datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so reports piped from stdout stay clean.
    let filter = if cli.verbose {
        EnvFilter::new("assay=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Analyze {
            file,
            output,
            timestamp_column,
            delimiter,
            max_rows,
        } => commands::analyze::run(
            file,
            output,
            commands::analyze::Options {
                timestamp_column,
                delimiter,
                max_rows,
            },
        ),

        Commands::Insights {
            report,
            severity,
            category,
            json,
        } => commands::insights::run(report, severity, category, json),

        Commands::Summary { report, json } => commands::summary::run(report, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
