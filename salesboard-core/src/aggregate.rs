//! Monthly aggregation: filtered records rolled up into (year, month) buckets

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filter::FilterState;
use crate::record::{Metric, SalesRecord};

/// Summed metrics for one (year, month) pair
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthBucket {
    pub year: i32,
    /// 1-12 in clean data; out-of-range months that survived coercion keep their value
    pub month: u32,
    /// Axis label, "Jan 2020" style
    pub label: String,
    pub retail_sales: f64,
    pub retail_transfers: f64,
    pub warehouse_sales: f64,
}

impl MonthBucket {
    /// Value of one metric channel for this bucket
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::RetailSales => self.retail_sales,
            Metric::RetailTransfers => self.retail_transfers,
            Metric::WarehouseSales => self.warehouse_sales,
        }
    }
}

/// Axis label for a (year, month) pair, with a numeric fallback for
/// months chrono cannot represent
pub fn month_label(year: i32, month: u32) -> String {
    match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(date) => date.format("%b %Y").to_string(),
        None => format!("M{} {}", month, year),
    }
}

/// Roll matching records up into one bucket per distinct (year, month)
///
/// Records whose year or month failed coercion (0) never bucket. All three
/// metrics are summed regardless of what the caller will display, so a
/// metric switch downstream needs no re-aggregation.
pub fn aggregate(records: &[SalesRecord], filter: &FilterState) -> Vec<MonthBucket> {
    // Group by (year, month)
    let mut groups: HashMap<(i32, u32), (f64, f64, f64)> = HashMap::new();

    for record in records {
        if !record.has_period() || !filter.matches(record) {
            continue;
        }
        let sums = groups.entry((record.year, record.month)).or_default();
        sums.0 += record.retail_sales;
        sums.1 += record.retail_transfers;
        sums.2 += record.warehouse_sales;
    }

    let mut buckets: Vec<MonthBucket> = groups
        .into_iter()
        .map(|((year, month), (retail_sales, retail_transfers, warehouse_sales))| MonthBucket {
            year,
            month,
            label: month_label(year, month),
            retail_sales,
            retail_transfers,
            warehouse_sales,
        })
        .collect();

    // Ascending (year, month); chart axes and summaries assume this order
    buckets.sort_by(|a, b| (a.year, a.month).cmp(&(b.year, b.month)));
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beer_and_wine() -> Vec<SalesRecord> {
        vec![
            SalesRecord::new(2020, 1, "BEER", 10.0, 1.0, 5.0),
            SalesRecord::new(2020, 1, "BEER", 2.5, 0.5, 0.0),
            SalesRecord::new(2020, 2, "BEER", 7.0, 0.0, 1.0),
            SalesRecord::new(2020, 1, "WINE", 100.0, 8.0, 50.0),
        ]
    }

    #[test]
    fn test_same_item_type_merges_by_month() {
        let records = beer_and_wine();
        let filter = FilterState::new().with_item_type("BEER");
        let buckets = aggregate(&records, &filter);

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "Jan 2020");
        assert_eq!(buckets[0].retail_sales, 12.5);
        assert_eq!(buckets[0].retail_transfers, 1.5);
        assert_eq!(buckets[0].warehouse_sales, 5.0);
        assert_eq!(buckets[1].label, "Feb 2020");
        assert_eq!(buckets[1].retail_sales, 7.0);
        assert_eq!(buckets[1].warehouse_sales, 1.0);
    }

    #[test]
    fn test_unfiltered_sums_across_item_types() {
        let records = beer_and_wine();
        let buckets = aggregate(&records, &FilterState::new());

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].retail_sales, 112.5);
        assert_eq!(buckets[0].warehouse_sales, 55.0);
    }

    #[test]
    fn test_output_is_chronological_regardless_of_input_order() {
        let records = vec![
            SalesRecord::new(2021, 3, "BEER", 1.0, 0.0, 0.0),
            SalesRecord::new(2019, 11, "BEER", 2.0, 0.0, 0.0),
            SalesRecord::new(2021, 1, "BEER", 3.0, 0.0, 0.0),
            SalesRecord::new(2019, 2, "BEER", 4.0, 0.0, 0.0),
            SalesRecord::new(2020, 12, "BEER", 5.0, 0.0, 0.0),
        ];
        let buckets = aggregate(&records, &FilterState::new());

        assert_eq!(buckets.len(), 5);
        for w in buckets.windows(2) {
            assert!(
                (w[0].year, w[0].month) < (w[1].year, w[1].month),
                "buckets not in chronological order"
            );
        }
        assert_eq!(buckets[0].label, "Feb 2019");
        assert_eq!(buckets[4].label, "Mar 2021");
    }

    #[test]
    fn test_one_bucket_per_distinct_pair() {
        let records = beer_and_wine();
        let buckets = aggregate(&records, &FilterState::new());
        let mut pairs: Vec<(i32, u32)> = buckets.iter().map(|b| (b.year, b.month)).collect();
        pairs.dedup();
        assert_eq!(pairs.len(), buckets.len());
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let records = beer_and_wine();
        let filter = FilterState::new().with_year(2020);
        let first = aggregate(&records, &filter);
        let second = aggregate(&records, &filter);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_period_rows_never_bucket() {
        let mut records = beer_and_wine();
        records.push(SalesRecord::new(0, 1, "BEER", 1000.0, 0.0, 0.0));
        records.push(SalesRecord::new(2020, 0, "BEER", 1000.0, 0.0, 0.0));

        let all = aggregate(&records, &FilterState::new());
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|b| b.retail_sales < 1000.0));

        let beer = aggregate(&records, &FilterState::new().with_item_type("BEER"));
        assert!(beer.iter().all(|b| b.retail_sales < 1000.0));
    }

    #[test]
    fn test_filter_matching_nothing_is_empty_not_error() {
        let records = beer_and_wine();
        let buckets = aggregate(&records, &FilterState::new().with_item_type("LIQUOR"));
        assert!(buckets.is_empty());
        let buckets = aggregate(&[], &FilterState::new());
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_negative_values_sum_through() {
        let records = vec![
            SalesRecord::new(2020, 5, "KEGS", 10.0, 0.0, -4.0),
            SalesRecord::new(2020, 5, "KEGS", -25.0, 0.0, 1.0),
        ];
        let buckets = aggregate(&records, &FilterState::new());
        assert_eq!(buckets[0].retail_sales, -15.0);
        assert_eq!(buckets[0].warehouse_sales, -3.0);
    }

    #[test]
    fn test_label_fallback_for_impossible_month() {
        assert_eq!(month_label(2020, 13), "M13 2020");
        assert_eq!(month_label(2020, 6), "Jun 2020");
        let records = vec![SalesRecord::new(2020, 13, "BEER", 1.0, 0.0, 0.0)];
        let buckets = aggregate(&records, &FilterState::new());
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].label, "M13 2020");
    }
}
