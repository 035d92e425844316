//! Distinct filter choices derived from the full record set

use serde::{Deserialize, Serialize};

use crate::record::SalesRecord;

/// Sorted distinct item types and years, always computed from the
/// unfiltered dataset so narrowing never hides the way back out
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DimensionIndex {
    pub item_types: Vec<String>,
    pub years: Vec<i32>,
}

impl DimensionIndex {
    /// Build the index from every record, filtered or not
    pub fn from_records(records: &[SalesRecord]) -> Self {
        let mut item_types: Vec<String> = records
            .iter()
            .filter(|r| !r.item_type.is_empty())
            .map(|r| r.item_type.clone())
            .collect();
        item_types.sort();
        item_types.dedup();

        let mut years: Vec<i32> = records
            .iter()
            .map(|r| r.year)
            .filter(|year| *year > 0)
            .collect();
        years.sort_unstable();
        years.dedup();

        Self { item_types, years }
    }

    pub fn is_empty(&self) -> bool {
        self.item_types.is_empty() && self.years.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_is_sorted_and_distinct() {
        let records = vec![
            SalesRecord::new(2021, 1, "WINE", 0.0, 0.0, 0.0),
            SalesRecord::new(2019, 2, "BEER", 0.0, 0.0, 0.0),
            SalesRecord::new(2021, 3, "BEER", 0.0, 0.0, 0.0),
            SalesRecord::new(2020, 4, "LIQUOR", 0.0, 0.0, 0.0),
        ];
        let index = DimensionIndex::from_records(&records);
        assert_eq!(index.item_types, vec!["BEER", "LIQUOR", "WINE"]);
        assert_eq!(index.years, vec![2019, 2020, 2021]);
    }

    #[test]
    fn test_empty_item_types_and_zero_years_are_excluded() {
        let records = vec![
            SalesRecord::new(2020, 1, "", 5.0, 0.0, 0.0),
            SalesRecord::new(0, 1, "BEER", 5.0, 0.0, 0.0),
            SalesRecord::new(-3, 1, "WINE", 5.0, 0.0, 0.0),
        ];
        let index = DimensionIndex::from_records(&records);
        assert_eq!(index.item_types, vec!["BEER", "WINE"]);
        assert!(index.years.is_empty());
    }

    #[test]
    fn test_empty_input_yields_empty_index() {
        let index = DimensionIndex::from_records(&[]);
        assert!(index.is_empty());
    }
}
