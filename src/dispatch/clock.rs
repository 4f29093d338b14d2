use std::time::Duration;

use tokio::time::Instant;

/// Monotonic time source used to measure request latency.
pub trait Clock: Send + Sync {
    type Instant: Copy + Send + Sync + 'static;

    fn now(&self) -> Self::Instant;

    fn elapsed(&self, since: Self::Instant) -> Duration;
}

/// Clock backed by the tokio runtime's monotonic timer, so paused test time
/// is honored.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: Instant) -> Duration {
        Instant::now().saturating_duration_since(since)
    }
}
