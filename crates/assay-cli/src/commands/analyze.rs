//! Analyze command - profile a data file and write its report.

use std::path::PathBuf;

use assay::input::ParserConfig;
use assay::report::report_path;
use assay::{Assay, AssayConfig, Severity};
use colored::Colorize;

/// Insights shown in the terminal; the report keeps all of them.
const TOP_INSIGHTS: usize = 5;

/// Loading options taken from the command line.
pub struct Options {
    pub timestamp_column: String,
    pub delimiter: Option<u8>,
    pub max_rows: Option<usize>,
}

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    options: Options,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );

    let assay = Assay::with_config(AssayConfig {
        parser: ParserConfig {
            delimiter: options.delimiter,
            max_rows: options.max_rows,
            ..ParserConfig::default()
        },
        timestamp_column: options.timestamp_column,
    });
    let result = assay.analyze(&file)?;
    let report = &result.report;
    let info = &report.basic_info;
    let source = &result.source;
    println!(
        "  {} {}, {} bytes, sha256 {}",
        "Source:".dimmed(),
        source.format,
        source.size_bytes,
        source.short_hash()
    );

    let output_path = output.unwrap_or_else(|| report_path(&file));
    report.save(&output_path)?;

    println!();
    println!("{}", "Key findings:".yellow().bold());
    println!(
        "  Dataset shape: {} rows x {} columns",
        info.row_count.to_string().white().bold(),
        info.column_count.to_string().white().bold()
    );
    match &info.date_range {
        Some(range) => {
            println!(
                "  Date range: {} to {}",
                range.start.format("%Y-%m-%d %H:%M:%S"),
                range.end.format("%Y-%m-%d %H:%M:%S")
            );
            println!("  Duration: {} days", range.duration_days);
        }
        None => println!("  Date range: {}", "no timestamps".dimmed()),
    }
    println!(
        "  Strong correlations found: {}",
        report.correlation_analysis.strong_correlations.len()
    );
    println!("  Insights generated: {}", report.insights.len());

    if !report.insights.is_empty() {
        println!();
        println!("{}", "Top insights:".yellow().bold());
        for (i, insight) in report.insights.iter().take(TOP_INSIGHTS).enumerate() {
            let category = format!("[{}]", insight.category.as_str());
            let category = match insight.severity {
                Severity::Warning => category.yellow(),
                Severity::Info => category.blue(),
            };
            println!("  {}. {} {}", i + 1, category, insight.message);
        }
    }

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );
    if report.insights.len() > TOP_INSIGHTS {
        println!(
            "Run {} to see all insights",
            format!("assay insights {}", output_path.display())
                .cyan()
                .bold()
        );
    }

    Ok(())
}
