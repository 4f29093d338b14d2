use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use crate::dispatch::ResultRecord;

use super::format::{format_secs, section_header};

/// Default size of the slowest-requests ranking.
pub const DEFAULT_SLOWEST: usize = 10;

/// A record retained in the slowest-requests ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlowEntry {
    pub latency: Duration,
    pub sequence_id: u64,
    pub target: Arc<str>,
}

impl Ord for SlowEntry {
    // Higher latency ranks first; among equal latencies the earlier dispatch does.
    fn cmp(&self, other: &Self) -> Ordering {
        self.latency
            .cmp(&other.latency)
            .then_with(|| other.sequence_id.cmp(&self.sequence_id))
    }
}

impl PartialOrd for SlowEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Running latency aggregate for one outcome category.
#[derive(Debug, Clone)]
pub struct StatsBucket {
    title: &'static str,
    count: u64,
    latency_sum: Duration,
    latency_min: Option<Duration>,
    latency_max: Duration,
    slowest_capacity: usize,
    // Min-heap of the slowest entries so the fastest retained one is evicted first.
    slowest: BinaryHeap<Reverse<SlowEntry>>,
    errors: Vec<(String, u64)>,
    error_index: HashMap<String, usize>,
}

impl StatsBucket {
    #[must_use]
    pub fn new(title: &'static str, slowest_capacity: usize) -> Self {
        Self {
            title,
            count: 0,
            latency_sum: Duration::ZERO,
            latency_min: None,
            latency_max: Duration::ZERO,
            slowest_capacity,
            slowest: BinaryHeap::with_capacity(slowest_capacity.saturating_add(1)),
            errors: Vec::new(),
            error_index: HashMap::new(),
        }
    }

    pub fn push(&mut self, record: &ResultRecord) {
        let latency = record.latency;
        self.count = self.count.saturating_add(1);
        self.latency_sum = self.latency_sum.saturating_add(latency);
        self.latency_min = Some(self.latency_min.map_or(latency, |min| min.min(latency)));
        self.latency_max = self.latency_max.max(latency);

        if self.slowest_capacity > 0 {
            self.slowest.push(Reverse(SlowEntry {
                latency,
                sequence_id: record.sequence_id,
                target: Arc::clone(&record.target),
            }));
            if self.slowest.len() > self.slowest_capacity {
                drop(self.slowest.pop());
            }
        }

        if let Some(message) = record.error.as_ref() {
            self.count_error(message);
        }
    }

    fn count_error(&mut self, message: &str) {
        if let Some(entry) = self
            .error_index
            .get(message)
            .and_then(|idx| self.errors.get_mut(*idx))
        {
            entry.1 = entry.1.saturating_add(1);
            return;
        }
        self.error_index
            .insert(message.to_owned(), self.errors.len());
        self.errors.push((message.to_owned(), 1));
    }

    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.title
    }

    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[must_use]
    pub const fn latency_sum(&self) -> Duration {
        self.latency_sum
    }

    #[must_use]
    pub const fn latency_min(&self) -> Option<Duration> {
        self.latency_min
    }

    #[must_use]
    pub const fn latency_max(&self) -> Option<Duration> {
        if self.count == 0 {
            None
        } else {
            Some(self.latency_max)
        }
    }

    #[must_use]
    pub fn latency_avg(&self) -> Option<Duration> {
        let avg_ns = self
            .latency_sum
            .as_nanos()
            .checked_div(u128::from(self.count))?;
        Some(Duration::from_nanos(
            u64::try_from(avg_ns).unwrap_or(u64::MAX),
        ))
    }

    /// Retained slowest entries, highest latency first.
    #[must_use]
    pub fn slowest(&self) -> Vec<SlowEntry> {
        let mut entries: Vec<SlowEntry> = self
            .slowest
            .iter()
            .map(|Reverse(entry)| entry.clone())
            .collect();
        entries.sort_by(|left, right| right.cmp(left));
        entries
    }

    /// Error message counts in order of first occurrence.
    #[must_use]
    pub fn error_histogram(&self) -> &[(String, u64)] {
        &self.errors
    }

    /// Summary lines for this bucket; nothing for an empty bucket.
    #[must_use]
    pub fn show(&self) -> Vec<String> {
        let (Some(avg), Some(min), Some(max)) =
            (self.latency_avg(), self.latency_min(), self.latency_max())
        else {
            return Vec::new();
        };
        vec![
            section_header(self.title),
            format!("  Total Requests: {}", self.count),
            format!("     Latency Ave: {}", format_secs(avg)),
            format!("     Latency Max: {}", format_secs(max)),
            format!("     Latency Min: {}", format_secs(min)),
        ]
    }

    #[must_use]
    pub fn show_slowest(&self) -> Vec<String> {
        let mut lines = vec![section_header("Slow Requests")];
        lines.extend(
            self.slowest()
                .into_iter()
                .map(|entry| format!("{} secs: {}", format_secs(entry.latency), entry.target)),
        );
        lines
    }

    #[must_use]
    pub fn show_error_types(&self) -> Vec<String> {
        let mut lines = vec![section_header("Error Types")];
        lines.extend(
            self.errors
                .iter()
                .map(|(message, count)| format!("{}: {}", message, count)),
        );
        lines
    }
}
