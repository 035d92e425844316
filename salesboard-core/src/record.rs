//! Sales record types shared across the dashboard pipeline

use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// One normalized row of warehouse/retail sales data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesRecord {
    /// Calendar year (0 when the source value failed coercion)
    pub year: i32,
    /// Calendar month 1-12 (0 when the source value failed coercion)
    pub month: u32,
    /// Product category as written in the source, possibly empty
    pub item_type: String,
    /// Retail sales for the month, in dollars
    pub retail_sales: f64,
    /// Retail transfers for the month
    pub retail_transfers: f64,
    /// Warehouse sales for the month
    pub warehouse_sales: f64,
}

impl SalesRecord {
    /// Create a new SalesRecord
    pub fn new(
        year: i32,
        month: u32,
        item_type: impl Into<String>,
        retail_sales: f64,
        retail_transfers: f64,
        warehouse_sales: f64,
    ) -> Self {
        Self {
            year,
            month,
            item_type: item_type.into(),
            retail_sales,
            retail_transfers,
            warehouse_sales,
        }
    }

    /// Value of one metric channel for this record
    pub fn metric(&self, metric: Metric) -> f64 {
        match metric {
            Metric::RetailSales => self.retail_sales,
            Metric::RetailTransfers => self.retail_transfers,
            Metric::WarehouseSales => self.warehouse_sales,
        }
    }

    /// Returns true if the year/month pair identifies a real month
    pub fn has_period(&self) -> bool {
        self.year > 0 && self.month != 0
    }
}

/// The three numeric channels a dashboard can plot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Metric {
    #[serde(rename = "retail-sales")]
    RetailSales,
    #[serde(rename = "retail-transfers")]
    RetailTransfers,
    #[serde(rename = "warehouse-sales")]
    WarehouseSales,
}

impl Metric {
    /// Canonical plotting order
    pub const ALL: [Metric; 3] = [
        Metric::RetailSales,
        Metric::RetailTransfers,
        Metric::WarehouseSales,
    ];

    /// Display name used in chart legends and reports
    pub fn label(&self) -> &'static str {
        match self {
            Metric::RetailSales => "Retail Sales",
            Metric::RetailTransfers => "Retail Transfers",
            Metric::WarehouseSales => "Warehouse Sales",
        }
    }

    /// Stable key used in config files and CLI flags
    pub fn key(&self) -> &'static str {
        match self {
            Metric::RetailSales => "retail-sales",
            Metric::RetailTransfers => "retail-transfers",
            Metric::WarehouseSales => "warehouse-sales",
        }
    }

    /// Next metric in canonical order, wrapping around
    pub fn next(&self) -> Metric {
        match self {
            Metric::RetailSales => Metric::RetailTransfers,
            Metric::RetailTransfers => Metric::WarehouseSales,
            Metric::WarehouseSales => Metric::RetailSales,
        }
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "retail-sales" | "retail_sales" | "sales" => Ok(Metric::RetailSales),
            "retail-transfers" | "retail_transfers" | "transfers" => Ok(Metric::RetailTransfers),
            "warehouse-sales" | "warehouse_sales" | "warehouse" => Ok(Metric::WarehouseSales),
            other => bail!(
                "unknown metric '{}' (expected retail-sales, retail-transfers, or warehouse-sales)",
                other
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_metric_access() {
        let record = SalesRecord::new(2020, 1, "WINE", 150.5, 20.0, 300.25);
        assert_eq!(record.metric(Metric::RetailSales), 150.5);
        assert_eq!(record.metric(Metric::RetailTransfers), 20.0);
        assert_eq!(record.metric(Metric::WarehouseSales), 300.25);
        assert!(record.has_period());
    }

    #[test]
    fn test_coerced_period_is_not_real() {
        let record = SalesRecord::new(2020, 0, "BEER", 1.0, 0.0, 0.0);
        assert!(!record.has_period());
        let record = SalesRecord::new(0, 3, "BEER", 1.0, 0.0, 0.0);
        assert!(!record.has_period());
    }

    #[test]
    fn test_metric_parse() {
        assert_eq!("warehouse".parse::<Metric>().unwrap(), Metric::WarehouseSales);
        assert_eq!("Retail-Sales".parse::<Metric>().unwrap(), Metric::RetailSales);
        assert!("revenue".parse::<Metric>().is_err());
    }

    #[test]
    fn test_metric_cycle_covers_all() {
        let mut metric = Metric::RetailSales;
        for expected in Metric::ALL {
            assert_eq!(metric, expected);
            metric = metric.next();
        }
        assert_eq!(metric, Metric::RetailSales);
    }

    #[test]
    fn test_metric_serde_key_round_trip() {
        let json = serde_json::to_string(&Metric::WarehouseSales).unwrap();
        assert_eq!(json, "\"warehouse-sales\"");
        let back: Metric = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Metric::WarehouseSales);
    }
}
