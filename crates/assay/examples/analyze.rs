//! Example: Analyze a sensor data file with Assay.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path> [timestamp_column]
//!
//! Example:
//!   cargo run --example analyze -- data/ggs01_gas.csv

use std::env;
use std::path::Path;

use assay::{Assay, AssayConfig, DEFAULT_TIMESTAMP_COLUMN, Severity};

fn main() -> assay::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path> [timestamp_column]");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- data/ggs01_gas.csv");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Assay Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let assay = Assay::with_config(AssayConfig {
        timestamp_column: args
            .get(2)
            .cloned()
            .unwrap_or_else(|| DEFAULT_TIMESTAMP_COLUMN.to_string()),
        ..AssayConfig::default()
    });
    let result = assay.analyze(path)?;
    let report = &result.report;

    println!("## Source Metadata");
    println!("  File: {}", result.source.file);
    println!("  Format: {}", result.source.format);
    println!("  Hash: {}", result.source.hash);
    println!("  Loaded: {}", result.source.loaded_at);
    println!("  Rows: {}", result.source.row_count);
    println!("  Columns: {}", result.source.column_count);
    if let Some(range) = &report.basic_info.date_range {
        println!(
            "  Date range: {} to {} ({} days)",
            range.start, range.end, range.duration_days
        );
    }
    println!("  Memory: {:.3} MB", report.basic_info.memory_usage_mb);
    println!();

    println!("## Summary Statistics ({} columns)", report.summary_statistics.len());
    println!();
    println!(
        "  {:20} {:>10} {:>10} {:>10} {:>10} {:>9}",
        "column", "mean", "std", "median", "skewness", "iqr out%"
    );
    for (name, stats) in &report.summary_statistics {
        let outliers = &report.outlier_detection[name];
        println!(
            "  {:20} {:>10.3} {:>10.3} {:>10.3} {:>10.3} {:>9.1}",
            name,
            stats.mean,
            stats.std,
            stats.median,
            stats.skewness,
            outliers.iqr_method.percentage
        );
    }
    println!();

    println!("## Normality");
    println!();
    for (name, result) in &report.normality_tests {
        let verdict = |v: Option<bool>| match v {
            Some(true) => "normal",
            Some(false) => "non-normal",
            None => "n/a",
        };
        println!(
            "  {:20} shapiro={:10} ks={:10} ad_rejects_5%={:?}",
            name,
            verdict(result.shapiro_wilk.is_normal),
            verdict(result.kolmogorov_smirnov.is_normal),
            result.anderson_darling.rejects_at(5.0)
        );
    }
    println!();

    println!(
        "## Correlations ({} notable pairs)",
        report.correlation_analysis.strong_correlations.len()
    );
    for pair in &report.correlation_analysis.strong_correlations {
        println!(
            "  {} ~ {}: pearson={:.3} spearman={} ({})",
            pair.column_a,
            pair.column_b,
            pair.pearson,
            pair.spearman
                .map(|s| format!("{:.3}", s))
                .unwrap_or_else(|| "n/a".to_string()),
            pair.strength.label()
        );
    }
    println!();

    println!("## Insights ({} total)", report.insights.len());
    for insight in &report.insights {
        let marker = match insight.severity {
            Severity::Warning => "!",
            Severity::Info => "-",
        };
        println!("  {} [{}] {}", marker, insight.category.as_str(), insight.message);
    }
    println!();

    println!("{}", separator);

    Ok(())
}
