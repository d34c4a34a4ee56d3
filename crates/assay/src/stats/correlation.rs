//! Pearson and Spearman correlation across numeric columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics, RankTieBreaker, Statistics};
use tracing::debug;

use crate::input::NumericColumn;

/// `|pearson|` above this makes a pair worth reporting.
pub const MODERATE_THRESHOLD: f64 = 0.5;

/// `|pearson|` above this makes a reported pair strong.
pub const STRONG_THRESHOLD: f64 = 0.7;

/// Square `column -> column -> coefficient` map in column order.
///
/// A cell is `None` when the coefficient is undefined for that pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationMatrix(IndexMap<String, IndexMap<String, Option<f64>>>);

impl CorrelationMatrix {
    /// Coefficient between two columns, `None` when unknown or undefined.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.0.get(a)?.get(b).copied().flatten()
    }

    /// Column names in matrix order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Option<f64>>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Build a matrix from upper-triangle cells, mirroring them below the
    /// diagonal.
    fn from_upper(names: &[&str], cell: impl Fn(usize, usize) -> Option<f64>) -> Self {
        let k = names.len();
        let mut grid = vec![vec![Some(1.0); k]; k];
        for i in 0..k {
            for j in (i + 1)..k {
                let value = cell(i, j);
                grid[i][j] = value;
                grid[j][i] = value;
            }
        }

        let map = names
            .iter()
            .zip(grid)
            .map(|(row_name, row)| {
                let row = names
                    .iter()
                    .zip(row)
                    .map(|(col_name, v)| (col_name.to_string(), v))
                    .collect();
                (row_name.to_string(), row)
            })
            .collect();
        Self(map)
    }
}

/// Qualitative strength of a reported correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationStrength {
    Strong,
    Moderate,
}

impl CorrelationStrength {
    pub fn label(&self) -> &'static str {
        match self {
            CorrelationStrength::Strong => "strong",
            CorrelationStrength::Moderate => "moderate",
        }
    }

    fn classify(pearson: f64) -> Option<Self> {
        let r = pearson.abs();
        if r > STRONG_THRESHOLD {
            Some(CorrelationStrength::Strong)
        } else if r > MODERATE_THRESHOLD {
            Some(CorrelationStrength::Moderate)
        } else {
            None
        }
    }
}

/// A column pair whose Pearson coefficient clears the reporting threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrongCorrelation {
    pub column_a: String,
    pub column_b: String,
    pub pearson: f64,
    pub spearman: Option<f64>,
    pub strength: CorrelationStrength,
}

/// Both correlation matrices plus the pairs worth reporting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationAnalysis {
    pub pearson: CorrelationMatrix,
    pub spearman: CorrelationMatrix,
    pub strong_correlations: Vec<StrongCorrelation>,
}

/// Correlate every pair of numeric columns.
///
/// Each pair uses only the rows where both values are present. Fewer than
/// two columns produce empty matrices.
pub fn analyze_correlations(columns: &[NumericColumn<'_>]) -> CorrelationAnalysis {
    if columns.len() < 2 {
        debug!(columns = columns.len(), "too few numeric columns to correlate");
        return CorrelationAnalysis::default();
    }

    let names: Vec<&str> = columns.iter().map(|c| c.name).collect();
    let k = columns.len();
    let mut cells = vec![vec![PairCell::default(); k]; k];
    for i in 0..k {
        for j in (i + 1)..k {
            let (x, y) = complete_pairs(&columns[i], &columns[j]);
            cells[i][j] = PairCell {
                pearson: pearson(&x, &y),
                spearman: spearman(&x, &y),
            };
        }
    }

    let pearson_cell = |i: usize, j: usize| cells[i][j].pearson;
    let spearman_cell = |i: usize, j: usize| cells[i][j].spearman;

    let mut strong_correlations = Vec::new();
    for i in 0..k {
        for j in (i + 1)..k {
            let Some(r) = pearson_cell(i, j) else { continue };
            if let Some(strength) = CorrelationStrength::classify(r) {
                strong_correlations.push(StrongCorrelation {
                    column_a: names[i].to_string(),
                    column_b: names[j].to_string(),
                    pearson: r,
                    spearman: spearman_cell(i, j),
                    strength,
                });
            }
        }
    }

    debug!(
        columns = columns.len(),
        strong = strong_correlations.len(),
        "correlation analysis"
    );

    CorrelationAnalysis {
        pearson: CorrelationMatrix::from_upper(&names, pearson_cell),
        spearman: CorrelationMatrix::from_upper(&names, spearman_cell),
        strong_correlations,
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct PairCell {
    pearson: Option<f64>,
    spearman: Option<f64>,
}

/// Values of two columns at rows where both are present and finite.
fn complete_pairs(a: &NumericColumn<'_>, b: &NumericColumn<'_>) -> (Vec<f64>, Vec<f64>) {
    a.values
        .iter()
        .zip(&b.values)
        .filter_map(|pair| match pair {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        })
        .unzip()
}

/// Product-moment coefficient; `None` for fewer than two rows or a
/// constant side.
fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || is_constant(x) || is_constant(y) {
        return None;
    }
    // r is scale-invariant; rescaling keeps the cross products finite.
    let x = rescaled(x);
    let y = rescaled(y);
    let cov = x.iter().covariance(y.iter());
    let denom = (x.iter().variance() * y.iter().variance()).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}

fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    pearson(&average_ranks(x), &average_ranks(y))
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

fn rescaled(values: &[f64]) -> Vec<f64> {
    let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0.0 {
        return values.to_vec();
    }
    values.iter().map(|v| v / scale).collect()
}

/// 1-based ranks with ties sharing the average of their positions.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    Data::new(values.to_vec()).ranks(RankTieBreaker::Average)
}
