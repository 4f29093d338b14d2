use std::fmt;

use crate::dispatch::ResultRecord;

use super::bucket::{DEFAULT_SLOWEST, StatsBucket};
use super::category::Category;
use super::format::duration_us;
use super::summary::{BucketSummary, ErrorSummary, ReportSummary, SlowSummary};

const TOTAL_TITLE: &str = "Total";

/// Routes each record into the total bucket and exactly one category bucket.
#[derive(Debug, Clone)]
pub struct Aggregator {
    total: StatsBucket,
    categories: Vec<(Category, StatsBucket)>,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl Aggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::with_slowest(DEFAULT_SLOWEST)
    }

    /// Aggregator whose total bucket keeps the `slowest` highest latencies.
    #[must_use]
    pub fn with_slowest(slowest: usize) -> Self {
        Self {
            total: StatsBucket::new(TOTAL_TITLE, slowest),
            categories: Category::ALL
                .iter()
                .map(|category| (*category, StatsBucket::new(category.title(), slowest)))
                .collect(),
        }
    }

    pub fn push(&mut self, record: &ResultRecord) {
        self.total.push(record);
        let category = Category::classify(record.status_code);
        if let Some((_, bucket)) = self
            .categories
            .iter_mut()
            .find(|(candidate, _)| *candidate == category)
        {
            bucket.push(record);
        }
    }

    pub fn extend<'rec, I>(&mut self, records: I)
    where
        I: IntoIterator<Item = &'rec ResultRecord>,
    {
        for record in records {
            self.push(record);
        }
    }

    #[must_use]
    pub fn finish(self) -> Report {
        Report {
            total: self.total,
            categories: self.categories,
        }
    }
}

/// Aggregates `records` with the default slowest-K size.
#[must_use]
pub fn report(records: &[ResultRecord]) -> Report {
    let mut aggregator = Aggregator::new();
    aggregator.extend(records);
    aggregator.finish()
}

/// Final, read-only aggregate of a dispatch run.
#[derive(Debug, Clone)]
pub struct Report {
    total: StatsBucket,
    categories: Vec<(Category, StatsBucket)>,
}

impl Report {
    #[must_use]
    pub const fn total(&self) -> &StatsBucket {
        &self.total
    }

    #[must_use]
    pub fn bucket(&self, category: Category) -> Option<&StatsBucket> {
        self.categories
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .map(|(_, bucket)| bucket)
    }

    /// Text report: total and non-empty category summaries, then the slowest
    /// requests and the error histogram of the total bucket.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.total.show();
        for (_, bucket) in &self.categories {
            lines.extend(bucket.show());
        }
        lines.extend(self.total.show_slowest());
        lines.extend(self.total.show_error_types());
        lines
    }

    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        let buckets = std::iter::once(&self.total)
            .chain(self.categories.iter().map(|(_, bucket)| bucket))
            .filter_map(bucket_summary)
            .collect();
        let slowest = self
            .total
            .slowest()
            .into_iter()
            .map(|entry| SlowSummary {
                sequence_id: entry.sequence_id,
                target: entry.target.to_string(),
                latency_us: duration_us(entry.latency),
            })
            .collect();
        let errors = self
            .total
            .error_histogram()
            .iter()
            .map(|(message, count)| ErrorSummary {
                message: message.clone(),
                count: *count,
            })
            .collect();
        ReportSummary {
            buckets,
            slowest,
            errors,
        }
    }

    /// # Errors
    ///
    /// Returns an error when the summary cannot be serialized.
    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.summary())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

fn bucket_summary(bucket: &StatsBucket) -> Option<BucketSummary> {
    Some(BucketSummary {
        title: bucket.title(),
        count: bucket.count(),
        avg_latency_us: duration_us(bucket.latency_avg()?),
        min_latency_us: duration_us(bucket.latency_min()?),
        max_latency_us: duration_us(bucket.latency_max()?),
    })
}
