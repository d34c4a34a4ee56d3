//! Insights command - list the findings of a saved report.

use std::path::PathBuf;

use assay::{Insight, InsightCategory, Severity};
use colored::Colorize;

use super::load_report;

pub fn run(
    file: PathBuf,
    severity: Option<Severity>,
    category: Option<InsightCategory>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = load_report(&file)?;
    let selected = filter(&report.insights, severity, category);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    if selected.is_empty() {
        if report.insights.is_empty() {
            println!("{}", "No insights - nothing crossed a threshold.".green());
        } else {
            println!(
                "No insights match the filter ({} in total).",
                report.insights.len()
            );
        }
        return Ok(());
    }

    println!(
        "{} ({} of {})",
        "Insights".cyan().bold(),
        selected.len(),
        report.insights.len()
    );
    println!();
    for (i, insight) in selected.iter().enumerate() {
        let label = match insight.severity {
            Severity::Warning => insight.severity.label().yellow().bold(),
            Severity::Info => insight.severity.label().blue(),
        };
        println!(
            "  {}. {:7} [{}] {}",
            i + 1,
            label,
            insight.category.as_str(),
            insight.message
        );
    }

    Ok(())
}

/// Insights matching both filters, in report order.
fn filter(
    insights: &[Insight],
    severity: Option<Severity>,
    category: Option<InsightCategory>,
) -> Vec<&Insight> {
    insights
        .iter()
        .filter(|i| severity.is_none_or(|s| i.severity == s))
        .filter(|i| category.is_none_or(|c| i.category == c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insights() -> Vec<Insight> {
        vec![
            Insight::warning(InsightCategory::DataQuality, "Significant missing data"),
            Insight::info(InsightCategory::Correlation, "a and b"),
            Insight::warning(InsightCategory::Outliers, "High outlier rate in co2"),
            Insight::info(InsightCategory::Distribution, "co2 is highly skewed"),
        ]
    }

    #[test]
    fn test_filter_by_severity() {
        let all = insights();
        let warnings = filter(&all, Some(Severity::Warning), None);
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].category, InsightCategory::DataQuality);
        assert_eq!(warnings[1].category, InsightCategory::Outliers);
    }

    #[test]
    fn test_filter_by_both() {
        let all = insights();
        assert_eq!(
            filter(&all, Some(Severity::Info), Some(InsightCategory::Outliers)).len(),
            0
        );
        assert_eq!(filter(&all, None, None).len(), 4);
    }
}
