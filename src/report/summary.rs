use serde::Serialize;

/// Serializable view of a rendered report.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub buckets: Vec<BucketSummary>,
    pub slowest: Vec<SlowSummary>,
    pub errors: Vec<ErrorSummary>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct BucketSummary {
    pub title: &'static str,
    pub count: u64,
    pub avg_latency_us: u64,
    pub min_latency_us: u64,
    pub max_latency_us: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SlowSummary {
    pub sequence_id: u64,
    pub target: String,
    pub latency_us: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorSummary {
    pub message: String,
    pub count: u64,
}
