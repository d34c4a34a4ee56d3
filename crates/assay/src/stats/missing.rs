//! Missing-value audit over every column of a dataset.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::Dataset;

/// Message carried by the report when no cell is missing.
pub const NO_MISSING_DATA_MESSAGE: &str = "No missing data found";

/// Missing cells in one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingColumn {
    pub count: usize,
    pub percentage: f64,
}

/// Per-column missing counts, or a sentinel when nothing is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MissingDataReport {
    /// No column has a missing value.
    NoMissing { message: String },
    /// Columns with at least one missing value, in dataset order.
    Columns(IndexMap<String, MissingColumn>),
}

impl MissingDataReport {
    fn no_missing() -> Self {
        MissingDataReport::NoMissing {
            message: NO_MISSING_DATA_MESSAGE.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, MissingDataReport::NoMissing { .. })
    }

    /// Affected columns; empty for the sentinel.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &MissingColumn)> {
        let map = match self {
            MissingDataReport::Columns(map) => Some(map),
            MissingDataReport::NoMissing { .. } => None,
        };
        map.into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v)))
    }

    /// Sum of the per-column percentages.
    pub fn total_percentage(&self) -> f64 {
        self.columns().map(|(_, c)| c.percentage).sum()
    }

    pub fn total_count(&self) -> usize {
        self.columns().map(|(_, c)| c.count).sum()
    }
}

/// Count missing cells per column.
pub fn audit_missing(dataset: &Dataset) -> MissingDataReport {
    let rows = dataset.row_count();
    let affected: IndexMap<String, MissingColumn> = dataset
        .columns()
        .iter()
        .filter_map(|col| {
            let count = col.missing_count();
            (count > 0).then(|| {
                (
                    col.name().to_string(),
                    MissingColumn {
                        count,
                        percentage: count as f64 / rows as f64 * 100.0,
                    },
                )
            })
        })
        .collect();

    debug!(columns_with_missing = affected.len(), "missing-data audit");

    if affected.is_empty() {
        MissingDataReport::no_missing()
    } else {
        MissingDataReport::Columns(affected)
    }
}
