//! Non-missing values of one numeric column.

use std::cmp::Ordering;

use statrs::statistics::Statistics;

use crate::input::NumericColumn;

/// The present values of a numeric column plus a sorted copy.
///
/// Built once per column per run and shared by the per-column analyses.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSample {
    name: String,
    values: Vec<f64>,
    sorted: Vec<f64>,
}

impl ColumnSample {
    /// Create a sample, dropping non-finite values.
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        Self {
            name: name.into(),
            values,
            sorted,
        }
    }

    /// Sample of the present cells of a numeric column.
    pub fn from_column(column: &NumericColumn<'_>) -> Self {
        Self::new(column.name, column.values.iter().flatten().copied())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Values in dataset row order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Values in ascending order.
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().mean())
    }

    /// Largest absolute value; dividing by it keeps squares and higher
    /// powers of the deviations finite.
    fn scale(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()))
    }

    /// Standard deviation with an `n - 1` denominator; 0.0 for one value.
    pub fn sample_std(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let scale = self.scale();
        if self.values.len() < 2 || scale == 0.0 {
            return Some(0.0);
        }
        Some(scale * self.values.iter().map(|x| x / scale).std_dev())
    }

    /// Standard deviation with an `n` denominator.
    pub fn population_std(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        let scale = self.scale();
        if scale == 0.0 {
            return Some(0.0);
        }
        Some(scale * self.values.iter().map(|x| x / scale).population_std_dev())
    }

    /// Mean of `((x - mean) / sigma)^k` with the population `sigma`.
    ///
    /// `None` for an empty or constant sample.
    pub fn standardized_moment(&self, k: i32) -> Option<f64> {
        if self.has_zero_variance() {
            return None;
        }
        let mean = self.mean()?;
        let sigma = self.population_std()?;
        if sigma == 0.0 {
            return None;
        }
        Some(
            self.values
                .iter()
                .map(|x| ((x - mean) / sigma).powi(k))
                .mean(),
        )
    }

    /// True when every value is identical (or there are none).
    ///
    /// Checked on the extremes rather than the variance, which rounding
    /// of the mean can leave slightly above zero for constant data.
    pub fn has_zero_variance(&self) -> bool {
        match (self.sorted.first(), self.sorted.last()) {
            (Some(lo), Some(hi)) => lo == hi,
            _ => true,
        }
    }

    /// Quantile by linear interpolation between closest ranks.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        let sorted = &self.sorted;
        if sorted.is_empty() {
            return None;
        }
        let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
        let lo = h.floor() as usize;
        let hi = (lo + 1).min(sorted.len() - 1);
        let frac = h - lo as f64;
        if frac == 0.0 {
            return Some(sorted[lo]);
        }
        let value = sorted[lo] + frac * (sorted[hi] - sorted[lo]);
        // Rounding can push the interpolant past its upper neighbour.
        Some(value.min(sorted[hi]))
    }
}
