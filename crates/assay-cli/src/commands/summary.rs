//! Summary command - per-column overview of a saved report.

use std::path::PathBuf;

use assay::Report;
use colored::Colorize;
use serde::Serialize;

use super::load_report;

/// One row of the overview table.
#[derive(Debug, Serialize)]
struct ColumnSummary<'a> {
    column: &'a str,
    count: usize,
    mean: f64,
    std: f64,
    skewness: f64,
    shapiro_normal: Option<bool>,
    ks_normal: Option<bool>,
    iqr_outlier_pct: Option<f64>,
    zscore_outlier_pct: Option<f64>,
}

pub fn run(file: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let report = load_report(&file)?;
    let rows = summarize(&report);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let info = &report.basic_info;
    println!(
        "{} {} rows x {} columns, {} numeric",
        "Summary:".cyan().bold(),
        info.row_count,
        info.column_count,
        rows.len()
    );
    if let Some(range) = &info.date_range {
        println!(
            "  {} to {} ({} days)",
            range.start.format("%Y-%m-%d %H:%M"),
            range.end.format("%Y-%m-%d %H:%M"),
            range.duration_days
        );
    }
    if let Some(total) = missing_summary(&report) {
        println!("  Missing: {}", total.yellow());
    }
    println!();

    if rows.is_empty() {
        println!("{}", "No numeric columns.".dimmed());
        return Ok(());
    }

    println!(
        "  {:20} {:>7} {:>11} {:>11} {:>9} {:>8} {:>8} {:>7} {:>7}",
        "column", "count", "mean", "std", "skew", "shapiro", "ks", "iqr%", "z%"
    );
    for row in &rows {
        println!(
            "  {:20} {:>7} {:>11.3} {:>11.3} {:>9.3} {:>8} {:>8} {:>7} {:>7}",
            row.column,
            row.count,
            row.mean,
            row.std,
            row.skewness,
            verdict(row.shapiro_normal),
            verdict(row.ks_normal),
            percent(row.iqr_outlier_pct),
            percent(row.zscore_outlier_pct)
        );
    }

    Ok(())
}

fn summarize(report: &Report) -> Vec<ColumnSummary<'_>> {
    report
        .summary_statistics
        .iter()
        .map(|(name, stats)| {
            let normality = report.normality_tests.get(name);
            let outliers = report.outlier_detection.get(name);
            ColumnSummary {
                column: name,
                count: stats.count,
                mean: stats.mean,
                std: stats.std,
                skewness: stats.skewness,
                shapiro_normal: normality.and_then(|n| n.shapiro_wilk.is_normal),
                ks_normal: normality.and_then(|n| n.kolmogorov_smirnov.is_normal),
                iqr_outlier_pct: outliers.map(|o| o.iqr_method.percentage),
                zscore_outlier_pct: outliers.map(|o| o.zscore_method.percentage),
            }
        })
        .collect()
}

fn missing_summary(report: &Report) -> Option<String> {
    if report.missing_data.is_sentinel() {
        return None;
    }
    let columns: Vec<String> = report
        .missing_data
        .columns()
        .map(|(name, col)| format!("{} {} ({:.1}%)", name, col.count, col.percentage))
        .collect();
    Some(columns.join(", "))
}

fn verdict(v: Option<bool>) -> &'static str {
    match v {
        Some(true) => "normal",
        Some(false) => "no",
        None => "-",
    }
}

fn percent(v: Option<f64>) -> String {
    v.map(|p| format!("{:.1}", p)).unwrap_or_else(|| "-".to_string())
}
