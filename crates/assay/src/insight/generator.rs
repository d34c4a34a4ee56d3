//! Fixed, ordered threshold rules over the computed statistics.

use indexmap::IndexMap;
use tracing::debug;

use super::{Insight, InsightCategory};
use crate::stats::{CorrelationAnalysis, DescriptiveStats, MissingDataReport, OutlierReport};

/// Row count above which sampling is suggested.
pub const LARGE_DATASET_ROWS: usize = 100_000;

/// Summed missing percentage above which missing data is significant.
pub const MISSING_PERCENT_THRESHOLD: f64 = 5.0;

/// IQR outlier percentage above which a column is flagged.
pub const OUTLIER_PERCENT_THRESHOLD: f64 = 5.0;

/// `|skewness|` above which a column is flagged.
pub const SKEWNESS_THRESHOLD: f64 = 1.0;

/// Everything the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct InsightInput<'a> {
    pub row_count: usize,
    pub missing: &'a MissingDataReport,
    pub summary: &'a IndexMap<String, DescriptiveStats>,
    pub outliers: &'a IndexMap<String, OutlierReport>,
    pub correlations: &'a CorrelationAnalysis,
}

type Rule = fn(&InsightInput<'_>) -> Vec<Insight>;

/// Evaluation order is part of the output contract.
const RULES: [Rule; 5] = [
    large_dataset,
    significant_missing,
    strong_correlations,
    high_outlier_rate,
    skewed_distribution,
];

/// Run every rule in order and collect what fires.
pub fn generate_insights(input: &InsightInput<'_>) -> Vec<Insight> {
    let insights: Vec<Insight> = RULES.iter().flat_map(|rule| rule(input)).collect();
    debug!(count = insights.len(), "generated insights");
    insights
}

fn large_dataset(input: &InsightInput<'_>) -> Vec<Insight> {
    if input.row_count <= LARGE_DATASET_ROWS {
        return Vec::new();
    }
    vec![Insight::info(
        InsightCategory::DataScale,
        format!(
            "Large dataset detected ({} rows). Consider sampling for initial exploration.",
            thousands(input.row_count)
        ),
    )]
}

fn significant_missing(input: &InsightInput<'_>) -> Vec<Insight> {
    if input.missing.is_sentinel() {
        return Vec::new();
    }
    let total = input.missing.total_percentage();
    if total <= MISSING_PERCENT_THRESHOLD {
        return Vec::new();
    }
    vec![Insight::warning(
        InsightCategory::DataQuality,
        format!("Significant missing data detected. Total missing: {total:.1}%"),
    )]
}

fn strong_correlations(input: &InsightInput<'_>) -> Vec<Insight> {
    input
        .correlations
        .strong_correlations
        .iter()
        .map(|pair| {
            Insight::info(
                InsightCategory::Correlation,
                format!(
                    "Strong {} correlation between {} and {} (r={:.2})",
                    pair.strength.label(),
                    pair.column_a,
                    pair.column_b,
                    pair.pearson
                ),
            )
        })
        .collect()
}

fn high_outlier_rate(input: &InsightInput<'_>) -> Vec<Insight> {
    input
        .outliers
        .iter()
        .filter(|(_, report)| report.iqr_method.percentage > OUTLIER_PERCENT_THRESHOLD)
        .map(|(column, report)| {
            Insight::warning(
                InsightCategory::Outliers,
                format!(
                    "High outlier rate in {}: {:.1}% of observations",
                    column, report.iqr_method.percentage
                ),
            )
        })
        .collect()
}

fn skewed_distribution(input: &InsightInput<'_>) -> Vec<Insight> {
    input
        .summary
        .iter()
        .filter(|(_, stats)| stats.skewness.abs() > SKEWNESS_THRESHOLD)
        .map(|(column, stats)| {
            Insight::info(
                InsightCategory::Distribution,
                format!(
                    "{} is highly skewed (skewness={:.2}). Consider transformation.",
                    column, stats.skewness
                ),
            )
        })
        .collect()
}

/// Format an integer with comma thousands separators.
fn thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::Severity;
    use crate::stats::{
        CorrelationStrength, IqrOutliers, MissingColumn, StrongCorrelation, ZScoreOutliers,
    };

    fn stats(skewness: f64) -> DescriptiveStats {
        DescriptiveStats {
            count: 10,
            mean: 1.0,
            std: 1.0,
            min: 0.0,
            p25: 0.5,
            median: 1.0,
            p75: 1.5,
            max: 2.0,
            range: 2.0,
            coefficient_of_variation: Some(1.0),
            skewness,
            kurtosis: 0.0,
        }
    }

    fn outliers(percentage: f64) -> OutlierReport {
        OutlierReport {
            iqr_method: IqrOutliers {
                lower_bound: -1.0,
                upper_bound: 3.0,
                count: 1,
                percentage,
            },
            zscore_method: ZScoreOutliers {
                threshold: 3.0,
                count: 0,
                percentage: 0.0,
            },
        }
    }

    struct Fixture {
        missing: MissingDataReport,
        summary: IndexMap<String, DescriptiveStats>,
        outliers: IndexMap<String, OutlierReport>,
        correlations: CorrelationAnalysis,
    }

    impl Fixture {
        fn quiet() -> Self {
            Self {
                missing: MissingDataReport::NoMissing {
                    message: "No missing data found".to_string(),
                },
                summary: IndexMap::from([("co2".to_string(), stats(0.2))]),
                outliers: IndexMap::from([("co2".to_string(), outliers(0.0))]),
                correlations: CorrelationAnalysis::default(),
            }
        }

        fn input(&self, row_count: usize) -> InsightInput<'_> {
            InsightInput {
                row_count,
                missing: &self.missing,
                summary: &self.summary,
                outliers: &self.outliers,
                correlations: &self.correlations,
            }
        }
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(200_001), "200,001");
        assert_eq!(thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn test_quiet_dataset_has_no_insights() {
        let fixture = Fixture::quiet();
        assert!(generate_insights(&fixture.input(500)).is_empty());
    }

    #[test]
    fn test_large_dataset_boundary() {
        let fixture = Fixture::quiet();
        assert!(generate_insights(&fixture.input(100_000)).is_empty());

        let insights = generate_insights(&fixture.input(200_001));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].category, InsightCategory::DataScale);
        assert_eq!(
            insights[0].message,
            "Large dataset detected (200,001 rows). Consider sampling for initial exploration."
        );
    }

    #[test]
    fn test_missing_data_uses_summed_percentage() {
        let mut fixture = Fixture::quiet();
        fixture.missing = MissingDataReport::Columns(IndexMap::from([
            (
                "co2".to_string(),
                MissingColumn {
                    count: 15,
                    percentage: 3.0,
                },
            ),
            (
                "site".to_string(),
                MissingColumn {
                    count: 22,
                    percentage: 4.5,
                },
            ),
        ]));
        let insights = generate_insights(&fixture.input(500));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].severity, Severity::Warning);
        assert_eq!(
            insights[0].message,
            "Significant missing data detected. Total missing: 7.5%"
        );
    }

    #[test]
    fn test_missing_data_at_threshold_is_quiet() {
        let mut fixture = Fixture::quiet();
        fixture.missing = MissingDataReport::Columns(IndexMap::from([(
            "co2".to_string(),
            MissingColumn {
                count: 25,
                percentage: 5.0,
            },
        )]));
        assert!(generate_insights(&fixture.input(500)).is_empty());
    }

    #[test]
    fn test_rule_order_and_messages() {
        let mut fixture = Fixture::quiet();
        fixture.summary = IndexMap::from([
            ("co2".to_string(), stats(1.2)),
            ("o2".to_string(), stats(-1.5)),
        ]);
        fixture.outliers = IndexMap::from([
            ("co2".to_string(), outliers(6.2)),
            ("o2".to_string(), outliers(5.0)),
        ]);
        fixture.correlations.strong_correlations = vec![StrongCorrelation {
            column_a: "co2".to_string(),
            column_b: "o2".to_string(),
            pearson: -0.6,
            spearman: Some(-0.55),
            strength: CorrelationStrength::Moderate,
        }];

        let messages: Vec<String> = generate_insights(&fixture.input(200_001))
            .into_iter()
            .map(|i| i.message)
            .collect();
        assert_eq!(
            messages,
            vec![
                "Large dataset detected (200,001 rows). Consider sampling for initial exploration.",
                "Strong moderate correlation between co2 and o2 (r=-0.60)",
                "High outlier rate in co2: 6.2% of observations",
                "co2 is highly skewed (skewness=1.20). Consider transformation.",
                "o2 is highly skewed (skewness=-1.50). Consider transformation.",
            ]
        );
    }
}
