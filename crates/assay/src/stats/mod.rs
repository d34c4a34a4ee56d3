//! Statistical analyses over the numeric columns of a dataset.
//!
//! Per-column analyses ([`describe`], [`test_normality`],
//! [`detect_outliers`]) take a [`ColumnSample`]; cross-column and
//! dataset-wide analyses ([`analyze_correlations`], [`audit_missing`])
//! take the columns or the dataset directly.

mod correlation;
mod descriptive;
pub mod distribution;
mod missing;
mod normality;
mod outliers;
mod sample;

pub use correlation::{
    CorrelationAnalysis, CorrelationMatrix, CorrelationStrength, StrongCorrelation,
    analyze_correlations,
};
pub use descriptive::{DescriptiveStats, describe};
pub use missing::{MissingColumn, MissingDataReport, NO_MISSING_DATA_MESSAGE, audit_missing};
pub use normality::{
    AndersonDarling, NormalityResult, PValueTest, SHAPIRO_MAX_SAMPLE, test_normality,
};
pub use outliers::{IqrOutliers, OutlierReport, ZScoreOutliers, detect_outliers};
pub use sample::ColumnSample;
