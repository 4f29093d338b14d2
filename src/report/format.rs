use std::time::Duration;

/// Width of a rendered section header line.
const HEADER_WIDTH: usize = 80;
/// Nanoseconds per millisecond.
const NS_PER_MS: u128 = 1_000_000;
/// Half a millisecond, for rounding to the nearest millisecond.
const HALF_MS_NS: u128 = 500_000;
/// Milliseconds per second.
const MS_PER_SEC: u128 = 1_000;

/// Renders a duration as seconds with three decimals, rounded to the nearest
/// millisecond.
#[must_use]
pub fn format_secs(duration: Duration) -> String {
    let millis = duration.as_nanos().saturating_add(HALF_MS_NS) / NS_PER_MS;
    format!("{}.{:03}", millis / MS_PER_SEC, millis % MS_PER_SEC)
}

pub(super) fn section_header(title: &str) -> String {
    let prefix = format!("---< {} >", title);
    let fill = HEADER_WIDTH.saturating_sub(prefix.chars().count());
    format!("{}{}", prefix, "-".repeat(fill))
}

pub(super) fn duration_us(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}
