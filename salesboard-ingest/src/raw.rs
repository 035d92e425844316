//! Raw CSV rows before any typing or coercion

use std::collections::HashMap;

/// Column names as they appear in the source header row
pub const COL_YEAR: &str = "YEAR";
pub const COL_MONTH: &str = "MONTH";
pub const COL_SUPPLIER: &str = "SUPPLIER";
pub const COL_ITEM_CODE: &str = "ITEM CODE";
pub const COL_ITEM_DESCRIPTION: &str = "ITEM DESCRIPTION";
pub const COL_ITEM_TYPE: &str = "ITEM TYPE";
pub const COL_RETAIL_SALES: &str = "RETAIL SALES";
pub const COL_RETAIL_TRANSFERS: &str = "RETAIL TRANSFERS";
pub const COL_WAREHOUSE_SALES: &str = "WAREHOUSE SALES";

/// One CSV data row as a column-name to value map
///
/// Carries no guarantees at all: columns may be missing and values may be
/// any string. The normalizer is the only consumer that interprets them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    values: HashMap<String, String>,
}

impl RawRow {
    pub fn new(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Value under a column, or "" when the column is absent
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_reads_as_empty() {
        let mut values = HashMap::new();
        values.insert(COL_YEAR.to_string(), "2020".to_string());
        let row = RawRow::new(values);
        assert_eq!(row.get(COL_YEAR), "2020");
        assert_eq!(row.get(COL_MONTH), "");
        assert_eq!(row.get("NO SUCH COLUMN"), "");
    }
}
