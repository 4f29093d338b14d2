//! Outcome aggregation and report rendering.
mod aggregator;
mod bucket;
mod category;
mod format;
mod summary;


pub use aggregator::{Aggregator, Report, report};
pub use bucket::{DEFAULT_SLOWEST, SlowEntry, StatsBucket};
pub use category::Category;
pub use format::format_secs;
pub use summary::{BucketSummary, ErrorSummary, ReportSummary, SlowSummary};
