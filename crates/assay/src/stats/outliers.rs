//! Outlier detection by the IQR rule and by z-score.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AssayError, Result};

use super::sample::ColumnSample;

/// Fences sit this many IQRs beyond the quartiles.
pub const IQR_MULTIPLIER: f64 = 1.5;

/// Values with `|z|` above this are outliers.
pub const ZSCORE_THRESHOLD: f64 = 3.0;

/// Outliers outside the Tukey fences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IqrOutliers {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub count: usize,
    pub percentage: f64,
}

/// Outliers by absolute z-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZScoreOutliers {
    pub threshold: f64,
    pub count: usize,
    pub percentage: f64,
}

/// Both outlier rules for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierReport {
    pub iqr_method: IqrOutliers,
    pub zscore_method: ZScoreOutliers,
}

/// Count outliers in a sample with both rules.
///
/// # Errors
///
/// [`AssayError::EmptySample`] when the sample has no values.
pub fn detect_outliers(sample: &ColumnSample) -> Result<OutlierReport> {
    let empty = || AssayError::EmptySample {
        column: sample.name().to_string(),
    };
    let n = sample.len();
    let q1 = sample.quantile(0.25).ok_or_else(empty)?;
    let q3 = sample.quantile(0.75).ok_or_else(empty)?;
    let mean = sample.mean().ok_or_else(empty)?;
    let sigma = sample.population_std().ok_or_else(empty)?;

    let percentage = |count: usize| count as f64 / n as f64 * 100.0;

    let iqr = q3 - q1;
    let lower_bound = q1 - IQR_MULTIPLIER * iqr;
    let upper_bound = q3 + IQR_MULTIPLIER * iqr;
    let iqr_count = sample
        .values()
        .iter()
        .filter(|&&x| x < lower_bound || x > upper_bound)
        .count();

    // Constant data has no meaningful z-scores.
    let z_count = if sample.has_zero_variance() || sigma <= f64::EPSILON * mean.abs() {
        0
    } else {
        sample
            .values()
            .iter()
            .filter(|&&x| ((x - mean) / sigma).abs() > ZSCORE_THRESHOLD)
            .count()
    };

    debug!(
        column = sample.name(),
        iqr_outliers = iqr_count,
        zscore_outliers = z_count,
        "outlier detection"
    );

    Ok(OutlierReport {
        iqr_method: IqrOutliers {
            lower_bound,
            upper_bound,
            count: iqr_count,
            percentage: percentage(iqr_count),
        },
        zscore_method: ZScoreOutliers {
            threshold: ZSCORE_THRESHOLD,
            count: z_count,
            percentage: percentage(z_count),
        },
    })
}
