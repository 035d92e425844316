//! One-shot view pipeline: records in, render-ready dashboard out
//!
//! There is no dependency tracking anywhere. Whenever any input changes
//! (new records, new filter, new metric) the caller rebuilds the whole
//! view; every stage is cheap and pure.

use serde::{Deserialize, Serialize};

use crate::aggregate::{MonthBucket, aggregate};
use crate::filter::FilterState;
use crate::project::{SeriesSelection, project};
use crate::record::{Metric, SalesRecord};
use crate::summary::{SummaryTotals, summarize};

/// Everything the user has currently selected
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardQuery {
    pub filter: FilterState,
    pub metric: Metric,
    pub show_all: bool,
}

impl Default for DashboardQuery {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            metric: Metric::RetailSales,
            show_all: false,
        }
    }
}

impl DashboardQuery {
    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }
}

/// Output of one pipeline run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub buckets: Vec<MonthBucket>,
    pub totals: SummaryTotals,
    pub selection: SeriesSelection,
}

impl DashboardView {
    /// True when the current filter matched no bucketable records
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Run aggregate, summarize, and project for one query
pub fn build_view(records: &[SalesRecord], query: &DashboardQuery) -> DashboardView {
    let buckets = aggregate(records, &query.filter);
    let totals = summarize(&buckets);
    let selection = project(&buckets, query.metric, query.show_all);
    DashboardView {
        buckets,
        totals,
        selection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<SalesRecord> {
        vec![
            SalesRecord::new(2020, 1, "BEER", 10.0, 1.0, 5.0),
            SalesRecord::new(2020, 1, "BEER", 2.5, 0.5, 0.0),
            SalesRecord::new(2020, 2, "BEER", 7.0, 0.0, 1.0),
            SalesRecord::new(2020, 1, "WINE", 100.0, 8.0, 50.0),
            SalesRecord::new(2020, 0, "WINE", 999.0, 9.0, 99.0),
        ]
    }

    #[test]
    fn test_full_pipeline_for_one_item_type() {
        let query = DashboardQuery::default()
            .with_filter(FilterState::new().with_item_type("BEER"))
            .with_metric(Metric::RetailSales);
        let view = build_view(&records(), &query);

        assert_eq!(view.buckets.len(), 2);
        assert_eq!(view.totals.months, 2);
        assert_eq!(view.totals.total_retail_sales, 19.5);
        assert_eq!(view.selection.labels, vec!["Jan 2020", "Feb 2020"]);
        assert_eq!(view.selection.series.len(), 1);
        assert_eq!(view.selection.series[0].points, vec![12.5, 7.0]);
    }

    #[test]
    fn test_unfiltered_totals_equal_sums_over_bucketable_records() {
        let records = records();
        let view = build_view(&records, &DashboardQuery::default());

        let expected: f64 = records
            .iter()
            .filter(|r| r.has_period())
            .map(|r| r.retail_sales)
            .sum();
        assert_eq!(view.totals.total_retail_sales, expected);

        let expected_ws: f64 = records
            .iter()
            .filter(|r| r.has_period())
            .map(|r| r.warehouse_sales)
            .sum();
        assert_eq!(view.totals.total_warehouse_sales, expected_ws);
    }

    #[test]
    fn test_metric_switch_changes_selection_only() {
        let records = records();
        let retail = build_view(&records, &DashboardQuery::default());
        let warehouse = build_view(
            &records,
            &DashboardQuery::default().with_metric(Metric::WarehouseSales),
        );

        assert_eq!(retail.buckets, warehouse.buckets);
        assert_eq!(retail.totals, warehouse.totals);
        assert_ne!(retail.selection, warehouse.selection);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let records = records();
        let query = DashboardQuery::default().with_show_all(true);
        assert_eq!(build_view(&records, &query), build_view(&records, &query));
    }

    #[test]
    fn test_empty_input_builds_empty_view() {
        let view = build_view(&[], &DashboardQuery::default());
        assert!(view.is_empty());
        assert_eq!(view.totals, SummaryTotals::default());
        assert!(view.selection.is_empty());
    }
}
