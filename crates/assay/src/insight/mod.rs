//! Qualitative findings derived from the computed statistics.

mod generator;

pub use generator::{InsightInput, generate_insights};

use serde::{Deserialize, Serialize};

/// Area of the dataset an insight is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    /// Size of the dataset.
    DataScale,
    /// Completeness of the dataset.
    DataQuality,
    /// Association between two columns.
    Correlation,
    /// Unusual values within a column.
    Outliers,
    /// Shape of a column's distribution.
    Distribution,
}

impl InsightCategory {
    /// Name as it appears in the serialized report.
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::DataScale => "data_scale",
            InsightCategory::DataQuality => "data_quality",
            InsightCategory::Correlation => "correlation",
            InsightCategory::Outliers => "outliers",
            InsightCategory::Distribution => "distribution",
        }
    }

    /// Parse a serialized category name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "data_scale" => Some(InsightCategory::DataScale),
            "data_quality" => Some(InsightCategory::DataQuality),
            "correlation" => Some(InsightCategory::Correlation),
            "outliers" => Some(InsightCategory::Outliers),
            "distribution" => Some(InsightCategory::Distribution),
            _ => None,
        }
    }
}

/// Severity level of an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Worth knowing, no action implied.
    Info,
    /// Likely to affect downstream analysis.
    Warning,
}

impl Severity {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Warning => "Warning",
        }
    }
}

/// One finding, with the numbers that triggered it embedded in the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub message: String,
    pub severity: Severity,
}

impl Insight {
    pub fn info(category: InsightCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn warning(category: InsightCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let insight = Insight::warning(InsightCategory::DataQuality, "Significant missing data");
        assert_eq!(
            serde_json::to_value(&insight).unwrap(),
            serde_json::json!({
                "category": "data_quality",
                "message": "Significant missing data",
                "severity": "warning"
            })
        );
    }

    #[test]
    fn test_category_names_round_trip() {
        for category in [
            InsightCategory::DataScale,
            InsightCategory::DataQuality,
            InsightCategory::Correlation,
            InsightCategory::Outliers,
            InsightCategory::Distribution,
        ] {
            assert_eq!(InsightCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(InsightCategory::parse("bogus"), None);
    }
}
