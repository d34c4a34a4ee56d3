//! The in-memory dataset handed to the analysis pipeline.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::{AssayError, Result};

use super::column::{Column, ColumnData};
use super::infer::infer_column;
use super::source::DataTable;

// Fixed cost of the row index, counted once per dataset.
const INDEX_BYTES: usize = 128;

/// A numeric column widened to `f64`, as seen by the analyses.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericColumn<'a> {
    pub name: &'a str,
    pub values: Vec<Option<f64>>,
}

/// Typed columns of equal length with one designated timestamp column.
///
/// Built once and never mutated; every analysis only borrows it.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    timestamp_index: usize,
    row_count: usize,
}

impl Dataset {
    /// Create a dataset from typed columns.
    ///
    /// Fails with [`AssayError::Config`] when there are no columns, names
    /// repeat, lengths differ, or `timestamp_column` is missing or not a
    /// timestamp column.
    pub fn new(columns: Vec<Column>, timestamp_column: &str) -> Result<Self> {
        let Some(first) = columns.first() else {
            return Err(AssayError::Config("dataset has no columns".to_string()));
        };
        let row_count = first.len();

        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name()) {
                return Err(AssayError::Config(format!(
                    "duplicate column name '{}'",
                    col.name()
                )));
            }
            if col.len() != row_count {
                return Err(AssayError::Config(format!(
                    "column '{}' has {} rows, expected {}",
                    col.name(),
                    col.len(),
                    row_count
                )));
            }
        }

        let timestamp_index = columns
            .iter()
            .position(|c| c.name() == timestamp_column)
            .ok_or_else(|| {
                AssayError::Config(format!("timestamp column '{}' not found", timestamp_column))
            })?;
        if !matches!(columns[timestamp_index].data(), ColumnData::Timestamp(_)) {
            return Err(AssayError::Config(format!(
                "column '{}' is {}, not a timestamp column",
                timestamp_column,
                columns[timestamp_index].column_type().label()
            )));
        }

        Ok(Self {
            columns,
            timestamp_index,
            row_count,
        })
    }

    /// Infer column types for a raw table and build a dataset from it.
    pub fn from_table(table: &DataTable, timestamp_column: &str) -> Result<Self> {
        if !table.headers.iter().any(|h| h == timestamp_column) {
            return Err(AssayError::Config(format!(
                "timestamp column '{}' not found in header",
                timestamp_column
            )));
        }

        let columns = (0..table.column_count())
            .map(|i| infer_column(table, i, table.headers[i] == timestamp_column))
            .collect::<Result<Vec<_>>>()?;

        Self::new(columns, timestamp_column)
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// The designated timestamp column.
    pub fn timestamp_column(&self) -> &Column {
        &self.columns[self.timestamp_index]
    }

    /// Earliest and latest non-missing timestamp.
    pub fn timestamp_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let ColumnData::Timestamp(values) = self.timestamp_column().data() else {
            return None;
        };
        let mut present = values.iter().flatten().copied();
        let first = present.next()?;
        Some(present.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts))))
    }

    /// Integer and float columns, in column order.
    pub fn numeric_columns(&self) -> Vec<NumericColumn<'_>> {
        self.columns
            .iter()
            .filter_map(|c| {
                c.data().numeric_values().map(|values| NumericColumn {
                    name: c.name(),
                    values,
                })
            })
            .collect()
    }

    /// Rough in-memory footprint of all columns plus the row index.
    pub fn estimated_memory_bytes(&self) -> usize {
        INDEX_BYTES
            + self
                .columns
                .iter()
                .map(|c| c.data().estimated_bytes())
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::parse_timestamp;

    fn ts(s: &str) -> Option<DateTime<Utc>> {
        parse_timestamp(s)
    }

    fn sample() -> Dataset {
        Dataset::new(
            vec![
                Column::timestamp(
                    "timestamp",
                    vec![ts("2025-02-01T00:00:00Z"), None, ts("2025-01-30T17:41:00Z")],
                ),
                Column::float("temperature_c", vec![Some(6.5), Some(6.6), None]),
                Column::text("site", vec![Some("GGS01".to_string()); 3]),
                Column::integer("pressure_mbar", vec![Some(1008), Some(1007), Some(1006)]),
            ],
            "timestamp",
        )
        .unwrap()
    }

    #[test]
    fn test_numeric_columns_keep_order() {
        let ds = sample();
        let names: Vec<&str> = ds.numeric_columns().iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["temperature_c", "pressure_mbar"]);
    }

    #[test]
    fn test_timestamp_range_skips_missing() {
        let (start, end) = sample().timestamp_range().unwrap();
        assert_eq!(start, ts("2025-01-30T17:41:00Z").unwrap());
        assert_eq!(end, ts("2025-02-01T00:00:00Z").unwrap());
    }

    #[test]
    fn test_rejects_ragged_columns() {
        let err = Dataset::new(
            vec![
                Column::timestamp("timestamp", vec![None, None]),
                Column::float("x", vec![Some(1.0)]),
            ],
            "timestamp",
        )
        .unwrap_err();
        assert!(matches!(err, AssayError::Config(_)));
    }

    #[test]
    fn test_rejects_non_timestamp_designation() {
        let err = Dataset::new(vec![Column::float("timestamp", vec![Some(1.0)])], "timestamp")
            .unwrap_err();
        assert!(err.to_string().contains("not a timestamp column"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = Dataset::new(
            vec![
                Column::timestamp("timestamp", vec![None]),
                Column::float("x", vec![None]),
                Column::float("x", vec![None]),
            ],
            "timestamp",
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_from_table_infers_types() {
        let table = DataTable::new(
            vec!["timestamp".into(), "oxygen_pct".into(), "quality".into()],
            vec![
                vec!["2025-01-30T17:41:00Z".into(), "23.8".into(), "good".into()],
                vec!["2025-01-30T19:41:00Z".into(), "".into(), "good".into()],
            ],
            b',',
        );
        let ds = Dataset::from_table(&table, "timestamp").unwrap();
        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.numeric_columns().len(), 1);
        assert_eq!(ds.column("oxygen_pct").unwrap().missing_count(), 1);
    }

    #[test]
    fn test_from_table_requires_timestamp_header() {
        let table = DataTable::new(vec!["x".into()], vec![vec!["1".into()]], b',');
        assert!(Dataset::from_table(&table, "timestamp").is_err());
    }
}
