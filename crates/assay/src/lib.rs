//! Assay: exploratory statistics for time-stamped sensor datasets.
//!
//! Assay loads a delimited file with a timestamp column, runs a fixed set of
//! analyses over its numeric columns and assembles the results into a single
//! [`Report`] that downstream renderers consume as JSON.
//!
//! # Analyses
//!
//! - **Descriptive statistics**: mean, spread, quartiles, skewness, kurtosis
//! - **Normality**: Shapiro-Wilk, Anderson-Darling and Kolmogorov-Smirnov
//! - **Outliers**: IQR fences and z-scores
//! - **Correlation**: Pearson and Spearman matrices with notable pairs
//! - **Missing data**: per-column counts over every column
//! - **Insights**: threshold rules that turn the numbers into findings
//!
//! # Example
//!
//! ```no_run
//! use assay::Assay;
//!
//! let assay = Assay::new();
//! let result = assay.analyze("sensors.csv").unwrap();
//!
//! println!("Rows: {}", result.report.basic_info.row_count);
//! for insight in &result.report.insights {
//!     println!("[{}] {}", insight.category.as_str(), insight.message);
//! }
//! ```

pub mod error;
pub mod input;
pub mod insight;
pub mod report;
pub mod stats;

mod assay;

pub use crate::assay::{AnalysisResult, Assay, AssayConfig, DEFAULT_TIMESTAMP_COLUMN};
pub use error::{AssayError, Result};
pub use input::{Column, ColumnType, Dataset, SourceMetadata};
pub use insight::{Insight, InsightCategory, Severity};
pub use report::{BasicInfo, DateRange, Report};
