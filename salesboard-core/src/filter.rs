//! Filter state for the dashboard's two independent dimensions

use serde::{Deserialize, Serialize};

use crate::record::SalesRecord;

/// Item-type dimension: everything, or one exact category string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ItemTypeFilter {
    All,
    Only(String),
}

impl ItemTypeFilter {
    /// Display label for the dashboard footer
    pub fn label(&self) -> &str {
        match self {
            ItemTypeFilter::All => "ALL",
            ItemTypeFilter::Only(item_type) => item_type,
        }
    }
}

/// Year dimension: everything, or one exact calendar year
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum YearFilter {
    All,
    Only(i32),
}

impl YearFilter {
    /// Display label for the dashboard footer
    pub fn label(&self) -> String {
        match self {
            YearFilter::All => "ALL".to_string(),
            YearFilter::Only(year) => year.to_string(),
        }
    }
}

/// The active selection restricting aggregation
///
/// Both dimensions are independent; a record must match both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilterState {
    pub item_type: ItemTypeFilter,
    pub year: YearFilter,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            item_type: ItemTypeFilter::All,
            year: YearFilter::All,
        }
    }
}

impl FilterState {
    /// Unfiltered selection (both dimensions wide open)
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the item-type dimension to one exact category
    pub fn with_item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = ItemTypeFilter::Only(item_type.into());
        self
    }

    /// Restrict the year dimension to one exact year
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = YearFilter::Only(year);
        self
    }

    /// Returns true when neither dimension restricts anything
    pub fn is_unfiltered(&self) -> bool {
        self.item_type == ItemTypeFilter::All && self.year == YearFilter::All
    }

    /// Exact-match test against one record
    pub fn matches(&self, record: &SalesRecord) -> bool {
        let item_ok = match &self.item_type {
            ItemTypeFilter::All => true,
            ItemTypeFilter::Only(item_type) => record.item_type == *item_type,
        };
        let year_ok = match self.year {
            YearFilter::All => true,
            YearFilter::Only(year) => record.year == year,
        };
        item_ok && year_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wine_2020() -> SalesRecord {
        SalesRecord::new(2020, 7, "WINE", 100.0, 10.0, 200.0)
    }

    #[test]
    fn test_unfiltered_matches_everything() {
        let filter = FilterState::new();
        assert!(filter.is_unfiltered());
        assert!(filter.matches(&wine_2020()));
        assert!(filter.matches(&SalesRecord::new(0, 0, "", -5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_item_type_is_exact_and_case_sensitive() {
        let filter = FilterState::new().with_item_type("WINE");
        assert!(filter.matches(&wine_2020()));
        let mut lower = wine_2020();
        lower.item_type = "wine".to_string();
        assert!(!filter.matches(&lower));
    }

    #[test]
    fn test_both_dimensions_must_match() {
        let filter = FilterState::new().with_item_type("WINE").with_year(2019);
        assert!(!filter.matches(&wine_2020()));
        let filter = FilterState::new().with_item_type("WINE").with_year(2020);
        assert!(filter.matches(&wine_2020()));
    }

    #[test]
    fn test_empty_item_type_is_a_real_value() {
        let filter = FilterState::new().with_item_type("");
        let mut record = wine_2020();
        record.item_type = String::new();
        assert!(filter.matches(&record));
        assert!(!filter.matches(&wine_2020()));
    }

    #[test]
    fn test_labels() {
        assert_eq!(FilterState::new().item_type.label(), "ALL");
        assert_eq!(FilterState::new().year.label(), "ALL");
        let filter = FilterState::new().with_item_type("BEER").with_year(2021);
        assert_eq!(filter.item_type.label(), "BEER");
        assert_eq!(filter.year.label(), "2021");
    }
}
