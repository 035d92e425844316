//! salesboard-core: Pure aggregation pipeline for the sales dashboard
//!
//! Every function in this crate is synchronous and side-effect free.
//! Loading, transport, and rendering live in the sibling crates.

pub mod record;
pub mod filter;
pub mod aggregate;
pub mod dimensions;
pub mod summary;
pub mod project;
pub mod dataset;
pub mod view;

pub use record::{Metric, SalesRecord};
pub use filter::{FilterState, ItemTypeFilter, YearFilter};
pub use aggregate::{MonthBucket, aggregate, month_label};
pub use dimensions::DimensionIndex;
pub use summary::{SummaryTotals, summarize};
pub use project::{MetricSeries, SeriesSelection, project};
pub use dataset::SalesDataset;
pub use view::{DashboardQuery, DashboardView, build_view};
