//! Record normalizer: raw rows to typed records, no row left behind
//!
//! This stage never fails and never drops a row. Every value that will
//! not parse becomes 0, so one bad cell costs exactly that cell.

use salesboard_core::SalesRecord;
use tracing::debug;

use crate::raw::{
    COL_ITEM_TYPE, COL_MONTH, COL_RETAIL_SALES, COL_RETAIL_TRANSFERS, COL_WAREHOUSE_SALES,
    COL_YEAR, RawRow,
};

/// Best-effort float coercion; retries with thousands separators stripped
pub fn coerce_number(raw: &str) -> f64 {
    parse_number(raw).unwrap_or(0.0)
}

/// None marks a non-empty value that failed both parse attempts; empty
/// cells are a plain 0
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed
        .parse()
        .ok()
        .or_else(|| trimmed.replace(",", "").parse().ok())
}

/// Best-effort year coercion; anything unparseable becomes 0
pub fn coerce_year(raw: &str) -> i32 {
    raw.trim().parse().unwrap_or(0)
}

/// Best-effort month coercion; anything unparseable (including negatives)
/// becomes 0
pub fn coerce_month(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Convert every raw row into a SalesRecord, preserving order and count
pub fn normalize_rows(rows: &[RawRow]) -> Vec<SalesRecord> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| normalize_row(index, row))
        .collect()
}

fn normalize_row(index: usize, row: &RawRow) -> SalesRecord {
    let record = SalesRecord::new(
        coerce_year(row.get(COL_YEAR)),
        coerce_month(row.get(COL_MONTH)),
        row.get(COL_ITEM_TYPE),
        coerce_metric(index, row, COL_RETAIL_SALES),
        coerce_metric(index, row, COL_RETAIL_TRANSFERS),
        coerce_metric(index, row, COL_WAREHOUSE_SALES),
    );
    if !record.has_period() {
        debug!(
            row = index,
            year = row.get(COL_YEAR),
            month = row.get(COL_MONTH),
            "row has no usable year/month and will not bucket"
        );
    }
    record
}

/// Metric coercion for one cell, with a diagnostic when the value is junk
fn coerce_metric(index: usize, row: &RawRow, column: &str) -> f64 {
    let raw = row.get(column);
    match parse_number(raw) {
        Some(value) => value,
        None => {
            debug!(
                row = index,
                column,
                value = raw,
                "cell failed numeric coercion, treating as 0"
            );
            0.0
        }
    }
}
