//! Series selection: which metric channels the renderer should draw

use serde::{Deserialize, Serialize};

use crate::aggregate::MonthBucket;
use crate::record::Metric;

/// One drawable series, points in bucket order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSeries {
    pub metric: Metric,
    /// Legend name
    pub name: String,
    pub points: Vec<f64>,
}

/// Everything a renderer needs for the current selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesSelection {
    /// X-axis labels, one per bucket
    pub labels: Vec<String>,
    pub series: Vec<MetricSeries>,
}

impl SeriesSelection {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Pick the visible series without touching the aggregation output
///
/// `show_all` wins over the single selection and always emits the three
/// channels in canonical order.
pub fn project(buckets: &[MonthBucket], selected: Metric, show_all: bool) -> SeriesSelection {
    let metrics: Vec<Metric> = if show_all {
        Metric::ALL.to_vec()
    } else {
        vec![selected]
    };

    let labels = buckets.iter().map(|b| b.label.clone()).collect();
    let series = metrics
        .into_iter()
        .map(|metric| MetricSeries {
            metric,
            name: metric.label().to_string(),
            points: buckets.iter().map(|b| b.value(metric)).collect(),
        })
        .collect();

    SeriesSelection { labels, series }
}
