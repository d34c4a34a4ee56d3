//! Central tendency, spread and shape of a column.

use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};

use super::sample::ColumnSample;

/// Summary statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator).
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
    pub range: f64,
    /// `std / mean`; `None` when the mean is zero.
    pub coefficient_of_variation: Option<f64>,
    /// Fisher-Pearson coefficient of skewness (biased).
    pub skewness: f64,
    /// Excess kurtosis (biased, 0.0 for a normal distribution).
    pub kurtosis: f64,
}

impl DescriptiveStats {
    /// Interquartile range.
    pub fn iqr(&self) -> f64 {
        self.p75 - self.p25
    }
}

/// Compute descriptive statistics for a sample.
///
/// # Errors
///
/// [`AssayError::EmptySample`] when the sample has no values.
pub fn describe(sample: &ColumnSample) -> Result<DescriptiveStats> {
    let empty = || AssayError::EmptySample {
        column: sample.name().to_string(),
    };

    let mean = sample.mean().ok_or_else(empty)?;
    let std = sample.sample_std().ok_or_else(empty)?;
    let sorted = sample.sorted();
    let (min, max) = (sorted[0], sorted[sorted.len() - 1]);
    let quantile = |p| sample.quantile(p).ok_or_else(empty);

    // Moments of standardized values cannot overflow for finite input.
    let skewness = sample.standardized_moment(3).unwrap_or(0.0);
    let kurtosis = sample.standardized_moment(4).map_or(0.0, |m4| m4 - 3.0);

    Ok(DescriptiveStats {
        count: sample.len(),
        mean,
        std,
        min,
        p25: quantile(0.25)?,
        median: quantile(0.5)?,
        p75: quantile(0.75)?,
        max,
        range: max - min,
        coefficient_of_variation: (mean != 0.0).then(|| std / mean),
        skewness,
        kurtosis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_describe_basic() {
        let stats = describe(&ColumnSample::new("x", [1.0, 2.0, 3.0, 4.0, 10.0])).unwrap();

        assert_eq!(stats.count, 5);
        assert!(close(stats.mean, 4.0));
        assert!(close(stats.std, 12.5_f64.sqrt()));
        assert_eq!((stats.min, stats.max, stats.range), (1.0, 10.0, 9.0));
        assert_eq!((stats.p25, stats.median, stats.p75), (2.0, 3.0, 4.0));
        assert!(close(stats.coefficient_of_variation.unwrap(), 12.5_f64.sqrt() / 4.0));
        // m2 = 10, m3 = 36, m4 = 278.8
        assert!(close(stats.skewness, 36.0 / 10.0_f64.powf(1.5)));
        assert!(close(stats.kurtosis, 278.8 / 100.0 - 3.0));
    }

    #[test]
    fn test_symmetric_sample_has_no_skew() {
        let stats = describe(&ColumnSample::new("x", [1.0, 2.0, 3.0, 4.0, 5.0])).unwrap();
        assert!(close(stats.skewness, 0.0));
        // Uniform-like data is platykurtic.
        assert!(stats.kurtosis < 0.0);
    }

    #[test]
    fn test_huge_values_have_finite_shape() {
        let stats =
            describe(&ColumnSample::new("x", [1e160, 2e160, 3e160, 5e160, 9e160])).unwrap();
        // Same shape as [1, 2, 3, 5, 9]: m2 = 8, m3 = 18, m4 = 144.8
        assert!(stats.std.is_finite());
        assert!((stats.skewness - 18.0 / 8.0_f64.powf(1.5)).abs() < 1e-9);
        assert!((stats.kurtosis - (144.8 / 64.0 - 3.0)).abs() < 1e-9);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(!json.contains("null"));
    }

    #[test]
    fn test_zero_mean_has_no_cv() {
        let stats = describe(&ColumnSample::new("x", [-1.0, 0.0, 1.0])).unwrap();
        assert_eq!(stats.coefficient_of_variation, None);
    }

    #[test]
    fn test_constant_sample() {
        let stats = describe(&ColumnSample::new("x", [6.6; 4])).unwrap();
        assert_eq!(stats.range, 0.0);
        assert_eq!(stats.iqr(), 0.0);
        assert_eq!((stats.skewness, stats.kurtosis), (0.0, 0.0));
        assert!(stats.std.abs() < 1e-12);
    }

    #[test]
    fn test_single_value() {
        let stats = describe(&ColumnSample::new("x", [3.0])).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_empty_sample_fails() {
        let err = describe(&ColumnSample::new("co2_pct", [])).unwrap_err();
        assert!(matches!(err, AssayError::EmptySample { column } if column == "co2_pct"));
    }
}
