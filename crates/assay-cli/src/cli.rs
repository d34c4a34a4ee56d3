//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use assay::{InsightCategory, Severity};

/// Assay: statistical profiling for time-stamped sensor datasets
#[derive(Parser)]
#[command(name = "assay")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging on stderr (otherwise RUST_LOG applies)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a data file and write its report
    Analyze {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for the report (default: <file>.eda.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Name of the timestamp column
        #[arg(short, long, default_value = assay::DEFAULT_TIMESTAMP_COLUMN)]
        timestamp_column: String,

        /// Field delimiter (auto-detected if omitted; "tab" for tabs)
        #[arg(short, long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,

        /// Only read the first N data rows
        #[arg(long)]
        max_rows: Option<usize>,
    },

    /// List the insights of a saved report
    Insights {
        /// Path to the report file
        #[arg(value_name = "REPORT")]
        report: PathBuf,

        /// Only show insights of this severity (info, warning)
        #[arg(short, long, value_parser = parse_severity)]
        severity: Option<Severity>,

        /// Only show insights of this category
        /// (data_scale, data_quality, correlation, outliers, distribution)
        #[arg(short, long, value_parser = parse_category)]
        category: Option<InsightCategory>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Per-column overview of a saved report
    Summary {
        /// Path to the report file
        #[arg(value_name = "REPORT")]
        report: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        "comma" => Ok(b','),
        "semicolon" => Ok(b';'),
        "pipe" => Ok(b'|'),
        _ => {
            let bytes = s.as_bytes();
            if bytes.len() == 1 && bytes[0].is_ascii() {
                Ok(bytes[0])
            } else {
                Err(format!(
                    "Unknown delimiter: {}. Use a single ASCII character or tab.",
                    s
                ))
            }
        }
    }
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    match s.to_lowercase().as_str() {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        _ => Err(format!("Unknown severity: {}. Use info or warning.", s)),
    }
}

fn parse_category(s: &str) -> Result<InsightCategory, String> {
    InsightCategory::parse(&s.to_lowercase().replace('-', "_")).ok_or_else(|| {
        format!(
            "Unknown category: {}. Use data_scale, data_quality, correlation, outliers, or distribution.",
            s
        )
    })
}
