//! In-memory dataset facade: the aggregation surface consumers call

use crate::aggregate::{self, MonthBucket};
use crate::dimensions::DimensionIndex;
use crate::filter::FilterState;
use crate::record::SalesRecord;

/// One session's worth of sales records plus the dimension index
/// computed once at load
///
/// A reload replaces the whole dataset; nothing here mutates after
/// construction.
#[derive(Debug, Clone)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
    dimensions: DimensionIndex,
}

impl SalesDataset {
    /// Take ownership of normalized records and index their dimensions
    pub fn from_records(records: Vec<SalesRecord>) -> Self {
        let dimensions = DimensionIndex::from_records(&records);
        Self {
            records,
            dimensions,
        }
    }

    /// Total loaded records, including rows excluded from aggregation
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    /// Distinct item types from the full dataset, independent of any filter
    pub fn item_types(&self) -> &[String] {
        &self.dimensions.item_types
    }

    /// Distinct years from the full dataset, independent of any filter
    pub fn years(&self) -> &[i32] {
        &self.dimensions.years
    }

    pub fn dimensions(&self) -> &DimensionIndex {
        &self.dimensions
    }

    /// Fresh aggregation for one filter; never cached, always re-derived
    pub fn aggregate(&self, filter: &FilterState) -> Vec<MonthBucket> {
        aggregate::aggregate(&self.records, filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> SalesDataset {
        SalesDataset::from_records(vec![
            SalesRecord::new(2020, 1, "BEER", 10.0, 1.0, 5.0),
            SalesRecord::new(2020, 2, "WINE", 20.0, 2.0, 6.0),
            SalesRecord::new(2021, 1, "LIQUOR", 30.0, 3.0, 7.0),
            SalesRecord::new(2020, 0, "CIDER", 40.0, 4.0, 8.0),
        ])
    }

    #[test]
    fn test_dimensions_reflect_full_dataset_under_narrow_filter() {
        let ds = dataset();
        let narrow = ds.aggregate(&FilterState::new().with_item_type("BEER").with_year(2020));
        assert_eq!(narrow.len(), 1);
        assert_eq!(ds.item_types(), ["BEER", "CIDER", "LIQUOR", "WINE"]);
        assert_eq!(ds.years(), [2020, 2021]);
    }

    #[test]
    fn test_record_count_includes_rows_aggregation_skips() {
        let ds = dataset();
        assert_eq!(ds.record_count(), 4);
        let buckets = ds.aggregate(&FilterState::new());
        let bucketed_months: usize = buckets.len();
        assert_eq!(bucketed_months, 3);
    }

    #[test]
    fn test_empty_dataset() {
        let ds = SalesDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.dimensions().is_empty());
        assert!(ds.aggregate(&FilterState::new()).is_empty());
    }
}
