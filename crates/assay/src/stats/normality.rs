//! Normality tests: Shapiro-Wilk, Anderson-Darling and Kolmogorov-Smirnov.
//!
//! The three tests run independently on the same sample and their verdicts
//! are never combined.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{AssayError, Result};

use super::distribution::{kolmogorov_sf, normal_cdf, normal_log_cdf, normal_quantile, normal_sf};
use super::sample::ColumnSample;

/// Largest sample the Shapiro-Wilk approximation is run on.
pub const SHAPIRO_MAX_SAMPLE: usize = 5000;

/// Smallest sample any of the tests accepts.
pub const MIN_NORMALITY_SAMPLE: usize = 3;

/// Significance level behind the `is_normal` verdicts.
const ALPHA: f64 = 0.05;

/// Anderson-Darling critical values for the normal case before the
/// small-sample adjustment.
const AD_BASE_CRITICAL: [f64; 5] = [0.576, 0.656, 0.787, 0.918, 1.092];

/// Significance levels (percent) matching [`AD_BASE_CRITICAL`].
const AD_SIGNIFICANCE: [f64; 5] = [15.0, 10.0, 5.0, 2.5, 1.0];

/// A test that reports a statistic and a p-value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PValueTest {
    pub statistic: Option<f64>,
    pub p_value: Option<f64>,
    pub is_normal: Option<bool>,
}

impl PValueTest {
    fn from_p_value(statistic: f64, p_value: f64) -> Self {
        Self {
            statistic: Some(statistic),
            p_value: Some(p_value),
            is_normal: Some(p_value > ALPHA),
        }
    }

    /// A test that was not run.
    fn not_computed() -> Self {
        Self {
            statistic: None,
            p_value: None,
            is_normal: None,
        }
    }
}

/// Anderson-Darling statistic with its critical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AndersonDarling {
    pub statistic: Option<f64>,
    pub critical_values: Vec<f64>,
    /// Percent, aligned with `critical_values`.
    pub significance_levels: Vec<f64>,
}

impl AndersonDarling {
    /// Whether normality is rejected at `level` percent.
    ///
    /// `None` when the statistic is unavailable or `level` is not one of the
    /// tabulated significance levels.
    pub fn rejects_at(&self, level: f64) -> Option<bool> {
        let statistic = self.statistic?;
        let idx = self.significance_levels.iter().position(|&l| l == level)?;
        Some(statistic > self.critical_values[idx])
    }
}

/// Results of all three normality tests for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    pub shapiro_wilk: PValueTest,
    pub anderson_darling: AndersonDarling,
    pub kolmogorov_smirnov: PValueTest,
}

/// Run the normality tests on a sample.
///
/// # Errors
///
/// [`AssayError::InsufficientSample`] when the sample has fewer than three
/// values.
pub fn test_normality(sample: &ColumnSample) -> Result<NormalityResult> {
    let n = sample.len();
    if n < MIN_NORMALITY_SAMPLE {
        return Err(AssayError::InsufficientSample {
            column: sample.name().to_string(),
            count: n,
            required: MIN_NORMALITY_SAMPLE,
        });
    }

    let critical_values = ad_critical_values(n);

    if sample.has_zero_variance() {
        warn!(column = sample.name(), "zero variance, normality tests not computed");
        return Ok(NormalityResult {
            shapiro_wilk: PValueTest::not_computed(),
            anderson_darling: AndersonDarling {
                statistic: None,
                critical_values,
                significance_levels: AD_SIGNIFICANCE.to_vec(),
            },
            kolmogorov_smirnov: PValueTest::not_computed(),
        });
    }

    // Non-zero variance with n >= 3 guarantees both are present.
    let (mean, std) = match (sample.mean(), sample.sample_std()) {
        (Some(mean), Some(std)) => (mean, std),
        _ => {
            return Err(AssayError::EmptySample {
                column: sample.name().to_string(),
            });
        }
    };
    let standardized: Vec<f64> = sample.sorted().iter().map(|x| (x - mean) / std).collect();

    // W is location and scale invariant, so the standardized order
    // statistics give the same statistic without overflowing.
    let shapiro_wilk = if n <= SHAPIRO_MAX_SAMPLE {
        let (w, p) = shapiro_wilk(&standardized);
        PValueTest::from_p_value(w, p)
    } else {
        warn!(
            column = sample.name(),
            n,
            max = SHAPIRO_MAX_SAMPLE,
            "sample too large, Shapiro-Wilk skipped"
        );
        PValueTest::not_computed()
    };

    let anderson_darling = AndersonDarling {
        statistic: Some(anderson_darling(&standardized)),
        critical_values,
        significance_levels: AD_SIGNIFICANCE.to_vec(),
    };

    let (d, ks_p) = kolmogorov_smirnov(&standardized);
    let kolmogorov_smirnov = PValueTest::from_p_value(d, ks_p);

    debug!(
        column = sample.name(),
        n,
        sw = ?shapiro_wilk.statistic,
        ad = ?anderson_darling.statistic,
        ks = d,
        "normality tests"
    );

    Ok(NormalityResult {
        shapiro_wilk,
        anderson_darling,
        kolmogorov_smirnov,
    })
}

/// Critical values adjusted for sample size, rounded to three decimals.
fn ad_critical_values(n: usize) -> Vec<f64> {
    let n = n as f64;
    let factor = 1.0 + 4.0 / n - 25.0 / (n * n);
    AD_BASE_CRITICAL
        .iter()
        .map(|c| (c / factor * 1000.0).round() / 1000.0)
        .collect()
}

/// A² over standardized order statistics.
fn anderson_darling(w: &[f64]) -> f64 {
    let n = w.len();
    let sum: f64 = (1..=n)
        .map(|i| {
            let weight = (2 * i - 1) as f64;
            // ln(1 - Φ(x)) == ln Φ(-x)
            weight * (normal_log_cdf(w[i - 1]) + normal_log_cdf(-w[n - i]))
        })
        .sum();
    -(n as f64) - sum / n as f64
}

/// Two-sided one-sample KS statistic against N(0, 1), with its p-value.
fn kolmogorov_smirnov(w: &[f64]) -> (f64, f64) {
    let n = w.len() as f64;
    let d = w
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let cdf = normal_cdf(x);
            let d_plus = (i + 1) as f64 / n - cdf;
            let d_minus = cdf - i as f64 / n;
            d_plus.max(d_minus)
        })
        .fold(0.0_f64, f64::max);

    let root_n = n.sqrt();
    let lambda = (root_n + 0.12 + 0.11 / root_n) * d;
    (d, kolmogorov_sf(lambda))
}

fn poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Royston's approximation to the Shapiro-Wilk W test (AS R94).
///
/// `x` must be sorted ascending, hold at least three values and not be
/// constant. Returns `(W, p_value)`.
fn shapiro_wilk(x: &[f64]) -> (f64, f64) {
    const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
    const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
    const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
    const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
    const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
    const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];
    const G: [f64; 2] = [-2.273, 0.459];

    let n = x.len();
    let nn2 = n / 2;
    let nf = n as f64;

    // Coefficients for the lower half; the upper half mirrors them.
    let mut a = vec![0.0; nn2];
    if n == 3 {
        a[0] = std::f64::consts::FRAC_1_SQRT_2;
    } else {
        let an25 = nf + 0.25;
        let m: Vec<f64> = (0..nn2)
            .map(|i| normal_quantile((i as f64 + 1.0 - 0.375) / an25))
            .collect();
        let summ2: f64 = 2.0 * m.iter().map(|v| v * v).sum::<f64>();
        let ssumm2 = summ2.sqrt();
        let rsn = 1.0 / nf.sqrt();

        let a1 = poly(&C1, rsn) - m[0] / ssumm2;
        let (first, fac) = if n > 5 {
            let a2 = -m[1] / ssumm2 + poly(&C2, rsn);
            let fac = ((summ2 - 2.0 * m[0] * m[0] - 2.0 * m[1] * m[1])
                / (1.0 - 2.0 * a1 * a1 - 2.0 * a2 * a2))
                .sqrt();
            a[1] = a2;
            (2, fac)
        } else {
            let fac = ((summ2 - 2.0 * m[0] * m[0]) / (1.0 - 2.0 * a1 * a1)).sqrt();
            (1, fac)
        };
        a[0] = a1;
        for i in first..nn2 {
            a[i] = -m[i] / fac;
        }
    }

    let mean = x.iter().sum::<f64>() / nf;
    let ssq: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    let numerator: f64 = a
        .iter()
        .enumerate()
        .map(|(i, ai)| ai * (x[n - 1 - i] - x[i]))
        .sum();
    let w = (numerator * numerator / ssq).min(1.0);

    if n == 3 {
        const PI6: f64 = 6.0 / std::f64::consts::PI;
        const STQR: f64 = std::f64::consts::FRAC_PI_3;
        let p = (PI6 * (w.sqrt().asin() - STQR)).max(0.0);
        return (w, p);
    }

    let w1 = (1.0 - w).ln();
    let p = if n <= 11 {
        let gamma = poly(&G, nf);
        if w1 >= gamma {
            0.0
        } else {
            let y = -(gamma - w1).ln();
            let m = poly(&C3, nf);
            let s = poly(&C4, nf).exp();
            normal_sf((y - m) / s)
        }
    } else {
        let ln_n = nf.ln();
        let m = poly(&C5, ln_n);
        let s = poly(&C6, ln_n).exp();
        normal_sf((w1 - m) / s)
    };

    (w, p)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEIGHTS: [f64; 11] = [
        148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0,
    ];

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn test_shapiro_wilk_skewed_sample() {
        let result = test_normality(&ColumnSample::new("weight", WEIGHTS)).unwrap();
        let sw = result.shapiro_wilk;
        assert!(close(sw.statistic.unwrap(), 0.788_815, 1e-4));
        assert!(close(sw.p_value.unwrap(), 0.006_704, 5e-4));
        assert_eq!(sw.is_normal, Some(false));
    }

    #[test]
    fn test_shapiro_wilk_three_values() {
        let result = test_normality(&ColumnSample::new("x", [4.0, 1.0, 2.0])).unwrap();
        let sw = result.shapiro_wilk;
        assert!(close(sw.statistic.unwrap(), 0.964_286, 1e-5));
        assert!(close(sw.p_value.unwrap(), 0.636_887, 1e-4));
        assert_eq!(sw.is_normal, Some(true));
    }

    #[test]
    fn test_shapiro_wilk_plausible_normal() {
        let values = [
            2.1, 3.4, 1.9, 5.6, 4.4, 3.3, 2.8, 3.9, 4.1, 3.0, 2.5, 3.6, 4.8, 2.2, 3.1,
        ];
        let sw = test_normality(&ColumnSample::new("x", values))
            .unwrap()
            .shapiro_wilk;
        assert!(close(sw.statistic.unwrap(), 0.969_598, 1e-4));
        assert!(close(sw.p_value.unwrap(), 0.852_05, 1e-3));
    }

    #[test]
    fn test_anderson_darling() {
        let ad = test_normality(&ColumnSample::new("weight", WEIGHTS))
            .unwrap()
            .anderson_darling;
        assert!(close(ad.statistic.unwrap(), 0.946_772, 1e-4));
        assert_eq!(ad.critical_values, vec![0.498, 0.567, 0.68, 0.793, 0.944]);
        assert_eq!(ad.significance_levels, vec![15.0, 10.0, 5.0, 2.5, 1.0]);
        assert_eq!(ad.rejects_at(5.0), Some(true));
        assert_eq!(ad.rejects_at(3.0), None);
    }

    #[test]
    fn test_kolmogorov_smirnov() {
        let ks = test_normality(&ColumnSample::new("weight", WEIGHTS))
            .unwrap()
            .kolmogorov_smirnov;
        assert!(close(ks.statistic.unwrap(), 0.259_215, 1e-4));
        assert!(close(ks.p_value.unwrap(), 0.393_528, 1e-3));
        assert_eq!(ks.is_normal, Some(true));
    }

    #[test]
    fn test_large_sample_skips_shapiro() {
        let values = (0..SHAPIRO_MAX_SAMPLE + 1).map(|i| (i % 97) as f64);
        let result = test_normality(&ColumnSample::new("x", values)).unwrap();
        assert_eq!(result.shapiro_wilk, PValueTest::not_computed());
        assert!(result.kolmogorov_smirnov.p_value.is_some());
        assert!(result.anderson_darling.statistic.is_some());
    }

    #[test]
    fn test_scale_does_not_change_results() {
        let small = test_normality(&ColumnSample::new("x", [1.0, 2.0, 3.0, 5.0, 9.0])).unwrap();
        let huge =
            test_normality(&ColumnSample::new("x", [1e160, 2e160, 3e160, 5e160, 9e160])).unwrap();
        let w = huge.shapiro_wilk.statistic.unwrap();
        assert!(close(w, small.shapiro_wilk.statistic.unwrap(), 1e-9));
        assert!(huge.shapiro_wilk.p_value.unwrap().is_finite());
        assert!(close(
            huge.anderson_darling.statistic.unwrap(),
            small.anderson_darling.statistic.unwrap(),
            1e-9
        ));
    }

    #[test]
    fn test_constant_sample_is_degenerate() {
        let result = test_normality(&ColumnSample::new("x", [6.6; 10])).unwrap();
        assert_eq!(result.shapiro_wilk, PValueTest::not_computed());
        assert_eq!(result.kolmogorov_smirnov, PValueTest::not_computed());
        assert_eq!(result.anderson_darling.statistic, None);
        assert_eq!(result.anderson_darling.critical_values.len(), 5);
    }

    #[test]
    fn test_too_few_values() {
        let err = test_normality(&ColumnSample::new("x", [1.0, 2.0])).unwrap_err();
        assert!(matches!(
            err,
            AssayError::InsufficientSample {
                count: 2,
                required: 3,
                ..
            }
        ));
    }
}
