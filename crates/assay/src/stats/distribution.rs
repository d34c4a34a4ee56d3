//! Normal and Kolmogorov distribution functions used by the tests.

use std::f64::consts::PI;

use statrs::distribution::{ContinuousCDF, Normal};

/// Standard normal cumulative distribution function.
pub fn normal_cdf(z: f64) -> f64 {
    Normal::standard().cdf(z)
}

/// Standard normal survival function, `1 - cdf(z)` without cancellation.
pub fn normal_sf(z: f64) -> f64 {
    Normal::standard().sf(z)
}

/// Natural log of the standard normal CDF, finite far into the lower tail.
pub fn normal_log_cdf(z: f64) -> f64 {
    let p = normal_cdf(z);
    if p > 0.0 {
        return p.ln();
    }
    // Mills ratio asymptote once the cdf underflows.
    -0.5 * z * z - (-z).ln() - 0.5 * (2.0 * PI).ln()
}

/// Inverse of the standard normal CDF.
pub fn normal_quantile(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }
    Normal::standard().inverse_cdf(p)
}

/// Survival function of the Kolmogorov distribution, `P(K > lambda)`.
pub fn kolmogorov_sf(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }
    let p = if lambda < 1.18 {
        // Theta-function form converges fast for small arguments.
        let y = (-PI * PI / (8.0 * lambda * lambda)).exp();
        let cdf = (2.0 * PI).sqrt() / lambda
            * (y + y.powi(9) + y.powi(25) + y.powi(49));
        1.0 - cdf
    } else {
        let x = (-2.0 * lambda * lambda).exp();
        2.0 * (x - x.powi(4) + x.powi(9) - x.powi(16))
    };
    p.clamp(0.0, 1.0)
}
