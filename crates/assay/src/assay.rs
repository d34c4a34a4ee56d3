//! Main Assay struct and public API.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::input::{Dataset, Parser, ParserConfig, SourceMetadata};
use crate::insight::{InsightInput, generate_insights};
use crate::report::{BasicInfo, Report};
use crate::stats::{
    ColumnSample, analyze_correlations, audit_missing, describe, detect_outliers, test_normality,
};

/// Name of the timestamp column unless configured otherwise.
pub const DEFAULT_TIMESTAMP_COLUMN: &str = "timestamp";

/// Configuration for an analysis run.
#[derive(Debug, Clone)]
pub struct AssayConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Column holding the observation time.
    pub timestamp_column: String,
}

impl Default for AssayConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            timestamp_column: DEFAULT_TIMESTAMP_COLUMN.to_string(),
        }
    }
}

/// Result of analyzing a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// The statistical report.
    pub report: Report,
}

/// The main analysis engine.
pub struct Assay {
    config: AssayConfig,
    parser: Parser,
}

impl Assay {
    /// Create a new Assay instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(AssayConfig::default())
    }

    /// Create an Assay instance with custom configuration.
    pub fn with_config(config: AssayConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &AssayConfig {
        &self.config
    }

    /// Load a delimited file into a typed dataset.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let (table, source) = self.parser.parse_file(path)?;
        debug!(
            file = %source.file,
            hash = source.short_hash(),
            loaded_at = %source.loaded_at,
            "loaded source"
        );
        let dataset = Dataset::from_table(&table, &self.config.timestamp_column)?;
        Ok((dataset, source))
    }

    /// Load a data file and analyze it.
    pub fn analyze(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let (dataset, source) = self.load(path)?;
        let report = self.run(&dataset)?;
        Ok(AnalysisResult { source, report })
    }

    /// Run every analysis over a dataset and assemble the report.
    ///
    /// The first failing component aborts the run; its error comes back
    /// wrapped in [`AssayError::Upstream`](crate::AssayError::Upstream)
    /// naming the report section that could not be built.
    pub fn run(&self, dataset: &Dataset) -> Result<Report> {
        let numeric = dataset.numeric_columns();
        debug!(
            rows = dataset.row_count(),
            numeric_columns = numeric.len(),
            "starting analysis"
        );

        let samples: Vec<ColumnSample> = numeric.iter().map(ColumnSample::from_column).collect();

        let summary_statistics = per_column(&samples, "summary_statistics", describe)?;
        let normality_tests = per_column(&samples, "normality_tests", test_normality)?;
        let outlier_detection = per_column(&samples, "outlier_detection", detect_outliers)?;
        let correlation_analysis = analyze_correlations(&numeric);
        let missing_data = audit_missing(dataset);

        let insights = generate_insights(&InsightInput {
            row_count: dataset.row_count(),
            missing: &missing_data,
            summary: &summary_statistics,
            outliers: &outlier_detection,
            correlations: &correlation_analysis,
        });

        info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            strong_correlations = correlation_analysis.strong_correlations.len(),
            insights = insights.len(),
            "analysis complete"
        );

        Ok(Report {
            basic_info: BasicInfo::from_dataset(dataset),
            missing_data,
            summary_statistics,
            normality_tests,
            outlier_detection,
            correlation_analysis,
            insights,
        })
    }
}

impl Default for Assay {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a per-column analysis to every sample, keyed by column name.
fn per_column<T>(
    samples: &[ColumnSample],
    stage: &'static str,
    analysis: impl Fn(&ColumnSample) -> Result<T>,
) -> Result<IndexMap<String, T>> {
    samples
        .iter()
        .map(|sample| {
            analysis(sample)
                .map(|value| (sample.name().to_string(), value))
                .map_err(|e| e.upstream(stage))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssayError;
    use crate::input::{Column, parse_timestamp};

    fn timestamps(n: usize) -> Column {
        Column::timestamp("timestamp", vec![parse_timestamp("2025-01-30T17:41:00Z"); n])
    }

    #[test]
    fn test_run_keeps_column_order() {
        let ds = Dataset::new(
            vec![
                timestamps(4),
                Column::float("temperature_c", vec![Some(6.5), Some(6.6), Some(7.0), Some(6.9)]),
                Column::text("site", vec![Some("GGS01".to_string()); 4]),
                Column::integer("pressure_mbar", vec![Some(1008), Some(1007), Some(1006), Some(1006)]),
            ],
            "timestamp",
        )
        .unwrap();
        let report = Assay::new().run(&ds).unwrap();

        let keys: Vec<&String> = report.summary_statistics.keys().collect();
        assert_eq!(keys, vec!["temperature_c", "pressure_mbar"]);
        assert_eq!(report.normality_tests.len(), 2);
        assert_eq!(report.outlier_detection.len(), 2);
        assert_eq!(report.correlation_analysis.pearson.len(), 2);
        assert!(report.missing_data.is_sentinel());
    }

    #[test]
    fn test_component_failure_is_wrapped() {
        let ds = Dataset::new(
            vec![timestamps(3), Column::float("co2", vec![None, None, None])],
            "timestamp",
        )
        .unwrap();
        let err = Assay::new().run(&ds).unwrap_err();

        assert!(matches!(
            err,
            AssayError::Upstream {
                stage: "summary_statistics",
                ..
            }
        ));
        assert!(matches!(err.root_cause(), AssayError::EmptySample { .. }));
    }

    #[test]
    fn test_short_column_fails_normality() {
        let ds = Dataset::new(
            vec![timestamps(3), Column::float("co2", vec![Some(1.0), Some(2.0), None])],
            "timestamp",
        )
        .unwrap();
        let err = Assay::new().run(&ds).unwrap_err();
        assert!(matches!(
            err,
            AssayError::Upstream {
                stage: "normality_tests",
                ..
            }
        ));
    }

    #[test]
    fn test_no_numeric_columns() {
        let ds = Dataset::new(
            vec![timestamps(2), Column::text("site", vec![None, Some("A".to_string())])],
            "timestamp",
        )
        .unwrap();
        let report = Assay::new().run(&ds).unwrap();
        assert!(report.summary_statistics.is_empty());
        assert!(report.correlation_analysis.pearson.is_empty());
        assert!(!report.missing_data.is_sentinel());
    }
}
