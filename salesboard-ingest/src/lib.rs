//! salesboard-ingest: CSV ingestion for the sales dashboard (raw rows,
//! normalization, transport).

pub mod raw;
pub mod normalize;
pub mod parser;
pub mod transport;

pub use raw::RawRow;
pub use normalize::{coerce_month, coerce_number, coerce_year, normalize_rows};
pub use parser::{parse_rows, read_records};
pub use transport::CsvSource;
