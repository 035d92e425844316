//! Parse warehouse/retail sales CSV text into raw rows
//!
//! Expected header columns: YEAR, MONTH, SUPPLIER, ITEM CODE,
//! ITEM DESCRIPTION, ITEM TYPE, RETAIL SALES, RETAIL TRANSFERS,
//! WAREHOUSE SALES. Extra columns ride along; missing ones read as "".

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use salesboard_core::SalesRecord;
use tracing::warn;

use crate::normalize::normalize_rows;
use crate::raw::RawRow;

/// Parse CSV text into raw rows keyed by the header
///
/// Unreadable rows are logged and skipped; a missing header row is the
/// only fatal condition.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = rdr.headers().context("reading CSV header row")?.clone();
    if headers.is_empty() {
        bail!("CSV input has no header row");
    }

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                // Header line is 1, so the first data row is line 2
                warn!(line = i + 2, error = %err, "skipping unreadable CSV row");
                continue;
            }
        };

        let mut values = HashMap::new();
        for (name, value) in headers.iter().zip(record.iter()) {
            values.insert(name.to_string(), value.to_string());
        }
        rows.push(RawRow::new(values));
    }

    Ok(rows)
}

/// Parse and normalize in one step
pub fn read_records(text: &str) -> Result<Vec<SalesRecord>> {
    let rows = parse_rows(text)?;
    Ok(normalize_rows(&rows))
}
