//! Date-column normalization.
//!
//! Upstream sources disagree wildly on date formatting, so normalization
//! tries a fixed, ordered list of known patterns against the whole column.
//! The first pattern that parses every cell wins, which keeps a column
//! internally consistent: `03-04-2024` must not silently mean March 4th in
//! one row and April 3rd in the next. Only when no single pattern covers
//! the column does a per-cell best-effort pass run.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{DatasetError, Result};

/// Known date-only patterns, tried in this order.
pub const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d", "%d-%m-%Y", "%m-%d-%Y", "%Y/%m/%d", "%d/%m/%Y", "%m/%d/%Y", "%d.%m.%Y", "%Y.%m.%d",
];

/// Parse every cell of a date column into timestamps.
///
/// Date-only cells resolve to midnight. Returns `UnparseableDate` naming
/// the first cell no strategy could handle; the error is non-fatal to the
/// caller, who still holds the raw table.
pub fn normalize_timestamps(cells: &[String]) -> Result<Vec<NaiveDateTime>> {
    if cells.is_empty() {
        return Ok(Vec::new());
    }

    for format in DATE_FORMATS {
        if let Some(parsed) = try_format_for_column(cells, format) {
            debug!(format, "date column normalized");
            return Ok(parsed);
        }
    }

    // No single pattern covers the column; fall back to best-effort per cell.
    debug!("no single date format matched; falling back to per-cell parse");
    cells
        .iter()
        .enumerate()
        .map(|(row, cell)| {
            parse_any(cell.trim()).ok_or_else(|| DatasetError::UnparseableDate {
                row,
                value: cell.clone(),
            })
        })
        .collect()
}

fn try_format_for_column(cells: &[String], format: &str) -> Option<Vec<NaiveDateTime>> {
    cells
        .iter()
        .map(|cell| parse_with_format(cell.trim(), format))
        .collect()
}

fn parse_with_format(cell: &str, format: &str) -> Option<NaiveDateTime> {
    let with_time = format!("{format} %H:%M:%S");
    if let Ok(ts) = NaiveDateTime::parse_from_str(cell, &with_time) {
        return Some(ts);
    }
    NaiveDate::parse_from_str(cell, format)
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn parse_any(cell: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = NaiveDateTime::parse_from_str(cell, "%Y-%m-%dT%H:%M:%S") {
        return Some(ts);
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| parse_with_format(cell, format))
}
