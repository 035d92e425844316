//! Summary totals folded over an aggregated month sequence

use serde::{Deserialize, Serialize};

use crate::aggregate::MonthBucket;
use crate::record::Metric;

/// Headline numbers for the current selection
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SummaryTotals {
    /// Number of distinct months in the selection
    pub months: usize,
    pub total_retail_sales: f64,
    pub total_retail_transfers: f64,
    pub total_warehouse_sales: f64,
}

impl SummaryTotals {
    /// Total for one metric channel
    pub fn total(&self, metric: Metric) -> f64 {
        match metric {
            Metric::RetailSales => self.total_retail_sales,
            Metric::RetailTransfers => self.total_retail_transfers,
            Metric::WarehouseSales => self.total_warehouse_sales,
        }
    }
}

/// Fold buckets into totals; the empty selection is all zeros
pub fn summarize(buckets: &[MonthBucket]) -> SummaryTotals {
    SummaryTotals {
        months: buckets.len(),
        total_retail_sales: buckets.iter().map(|b| b.retail_sales).sum(),
        total_retail_transfers: buckets.iter().map(|b| b.retail_transfers).sum(),
        total_warehouse_sales: buckets.iter().map(|b| b.warehouse_sales).sum(),
    }
}
