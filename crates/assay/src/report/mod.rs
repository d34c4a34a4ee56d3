//! The assembled analysis report.

mod persistence;

pub use persistence::report_path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::{ColumnType, Dataset};
use crate::insight::Insight;
use crate::stats::{
    CorrelationAnalysis, DescriptiveStats, MissingDataReport, NormalityResult, OutlierReport,
};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// First and last timestamp of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Whole days between `start` and `end`, rounded down.
    pub duration_days: i64,
}

/// Dataset-level facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<String>,
    pub dtypes: IndexMap<String, ColumnType>,
    /// Estimated in-memory footprint.
    pub memory_usage_mb: f64,
    /// `None` when the timestamp column holds no value.
    pub date_range: Option<DateRange>,
}

impl BasicInfo {
    /// Describe the shape and extent of a dataset.
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let date_range = dataset.timestamp_range().map(|(start, end)| DateRange {
            start,
            end,
            duration_days: (end - start).num_days(),
        });

        Self {
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            columns: dataset.column_names().into_iter().map(String::from).collect(),
            dtypes: dataset
                .columns()
                .iter()
                .map(|c| (c.name().to_string(), c.column_type()))
                .collect(),
            memory_usage_mb: dataset.estimated_memory_bytes() as f64 / BYTES_PER_MB,
            date_range,
        }
    }
}

/// Everything one analysis run produces.
///
/// Per-column maps are keyed by column name in dataset column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub basic_info: BasicInfo,
    pub missing_data: MissingDataReport,
    pub summary_statistics: IndexMap<String, DescriptiveStats>,
    pub normality_tests: IndexMap<String, NormalityResult>,
    pub outlier_detection: IndexMap<String, OutlierReport>,
    pub correlation_analysis: CorrelationAnalysis,
    pub insights: Vec<Insight>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Column, parse_timestamp};

    #[test]
    fn test_basic_info() {
        let ds = Dataset::new(
            vec![
                Column::timestamp(
                    "timestamp",
                    vec![
                        parse_timestamp("2025-01-30T17:41:00Z"),
                        parse_timestamp("2025-02-02T17:40:00Z"),
                    ],
                ),
                Column::float("co2", vec![Some(0.4), None]),
                Column::text("site", vec![Some("GGS01".to_string()), None]),
            ],
            "timestamp",
        )
        .unwrap();
        let info = BasicInfo::from_dataset(&ds);

        assert_eq!(info.row_count, 2);
        assert_eq!(info.columns, vec!["timestamp", "co2", "site"]);
        assert_eq!(info.dtypes["co2"], ColumnType::Float);
        // Just short of three full days.
        assert_eq!(info.date_range.as_ref().unwrap().duration_days, 2);

        // 16 + 16 + (8 + 49 + 5) + (8 + 16) + 128
        let expected = (16 + 16 + 62 + 24 + 128) as f64 / BYTES_PER_MB;
        assert!((info.memory_usage_mb - expected).abs() < 1e-15);
    }

    #[test]
    fn test_no_timestamps_means_no_range() {
        let ds = Dataset::new(vec![Column::timestamp("timestamp", vec![None; 3])], "timestamp")
            .unwrap();
        let info = BasicInfo::from_dataset(&ds);
        assert_eq!(info.date_range, None);
        assert_eq!(
            serde_json::to_value(&info).unwrap()["date_range"],
            serde_json::Value::Null
        );
    }
}
