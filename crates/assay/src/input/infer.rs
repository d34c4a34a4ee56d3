//! Column type inference for raw string tables.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AssayError, Result};

use super::column::{Column, ColumnData};
use super::source::{DataTable, is_missing_token};

// Cheap pre-check before trying the chrono formats.
static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("valid date regex"));

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a date-time cell. Values without an offset are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if !DATE_PREFIX.is_match(trimmed) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn parse_bool(value: &str) -> Option<bool> {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Build a typed column from the raw cells of `table` at `index`.
///
/// The first type every present cell parses as wins, in the order
/// integer, float, boolean, timestamp; otherwise the column is text.
/// A column without present cells is text. When `require_timestamp` is set
/// the column must parse as timestamps and the first offending row is
/// reported.
pub(crate) fn infer_column(
    table: &DataTable,
    index: usize,
    require_timestamp: bool,
) -> Result<Column> {
    let name = table.headers[index].clone();
    let cells: Vec<Option<&str>> = table
        .column_values(index)
        .map(|v| (!is_missing_token(v)).then(|| v.trim()))
        .collect();

    if require_timestamp {
        let mut values = Vec::with_capacity(cells.len());
        for (row, cell) in cells.iter().enumerate() {
            match cell {
                None => values.push(None),
                Some(v) => match parse_timestamp(v) {
                    Some(ts) => values.push(Some(ts)),
                    None => {
                        return Err(AssayError::Parse {
                            row: row + 1,
                            column: index + 1,
                            message: format!("'{}' is not a valid timestamp in '{}'", v, name),
                        });
                    }
                },
            }
        }
        return Ok(Column::timestamp(name, values));
    }

    let present = cells.iter().flatten();
    if present.clone().next().is_none() {
        return Ok(Column::text(name, vec![None; cells.len()]));
    }

    let data = if present.clone().all(|v| v.parse::<i64>().is_ok()) {
        ColumnData::Integer(cells.iter().map(|c| c.and_then(|v| v.parse().ok())).collect())
    } else if present.clone().all(|v| v.parse::<f64>().is_ok()) {
        // "inf" and overflowing literals parse but carry no reading.
        ColumnData::Float(
            cells
                .iter()
                .map(|c| c.and_then(|v| v.parse::<f64>().ok()).filter(|x| x.is_finite()))
                .collect(),
        )
    } else if present.clone().all(|v| parse_bool(v).is_some()) {
        ColumnData::Boolean(cells.iter().map(|c| c.and_then(parse_bool)).collect())
    } else if present.clone().all(|v| parse_timestamp(v).is_some()) {
        ColumnData::Timestamp(cells.iter().map(|c| c.and_then(parse_timestamp)).collect())
    } else {
        ColumnData::Text(cells.iter().map(|c| c.map(str::to_string)).collect())
    };

    Ok(Column::new(name, data))
}
