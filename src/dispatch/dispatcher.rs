use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::error::DispatchError;
use crate::targets::{SelectionMode, TargetSelector};

use super::clock::{Clock, MonotonicClock};
use super::record::ResultRecord;
use super::transport::{Transport, TransportFailure};

/// Pause taken by the launch loop after every `rate_per_tick` launches.
pub const PACING_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchConfig {
    pub mode: SelectionMode,
    /// Total requests to launch; clamped to the target count in sequential mode.
    pub limit: u64,
    pub rate_per_tick: u64,
    /// Forwarded to the transport untouched.
    pub timeout: Duration,
    /// Seed for random selection; entropy-seeded when absent.
    pub seed: Option<u64>,
}

/// Launches requests concurrently at a paced rate and collects one record per
/// launch, in launch order.
pub struct Dispatcher<C = MonotonicClock> {
    config: DispatchConfig,
    clock: Arc<C>,
    next_sequence_id: u64,
    pauses: u64,
}

struct PendingDispatch<I> {
    sequence_id: u64,
    target: Arc<str>,
    started: I,
    handle: JoinHandle<ResultRecord>,
}

impl Dispatcher<MonotonicClock> {
    /// Creates a dispatcher measuring latency with the runtime clock.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRateConfig` when `rate_per_tick` is zero.
    pub fn new(config: DispatchConfig) -> Result<Self, DispatchError> {
        Self::with_clock(config, MonotonicClock)
    }
}

impl<C> Dispatcher<C>
where
    C: Clock + 'static,
{
    /// Creates a dispatcher with an explicit latency clock.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRateConfig` when `rate_per_tick` is zero.
    pub fn with_clock(config: DispatchConfig, clock: C) -> Result<Self, DispatchError> {
        if config.rate_per_tick == 0 {
            return Err(DispatchError::InvalidRateConfig);
        }
        Ok(Self {
            config,
            clock: Arc::new(clock),
            next_sequence_id: 0,
            pauses: 0,
        })
    }

    /// Number of pacing pauses taken over this dispatcher's lifetime.
    #[must_use]
    pub const fn pauses(&self) -> u64 {
        self.pauses
    }

    /// Selects targets per the configured mode and seed, launches up to the
    /// effective limit of requests and waits for all of them. Per-request
    /// failures become records; only selection preconditions fail the run.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTargetSet` when random selection is asked to draw from an
    /// empty target list. No request has been sent in that case.
    pub async fn run<I, S, T>(
        &mut self,
        targets: I,
        transport: Arc<T>,
    ) -> Result<Vec<ResultRecord>, DispatchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
        T: Transport + ?Sized + 'static,
    {
        let mut selector = self.selector(targets);
        let limit = selector.effective_limit(self.config.limit);
        let rate = self.config.rate_per_tick;
        let mut pending = Vec::new();
        let mut launched: u64 = 0;

        while launched < limit {
            let Some(target) = selector.next_target()? else {
                break;
            };
            pending.push(self.launch(target, Arc::clone(&transport)));
            launched = launched.saturating_add(1);

            if launched < limit && launched.checked_rem(rate) == Some(0) {
                info!("Current requests: {}", launched);
                self.pauses = self.pauses.saturating_add(1);
                sleep(PACING_INTERVAL).await;
            }
        }
        info!("Total requests: {}", launched);

        let mut records = Vec::with_capacity(pending.len());
        for task in pending {
            records.push(self.resolve(task).await);
        }
        Ok(records)
    }

    fn selector<I, S>(&self, targets: I) -> TargetSelector
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        match self.config.seed {
            Some(seed) => TargetSelector::with_seed(targets, self.config.mode, seed),
            None => TargetSelector::new(targets, self.config.mode),
        }
    }

    fn launch<T>(&mut self, target: Arc<str>, transport: Arc<T>) -> PendingDispatch<C::Instant>
    where
        T: Transport + ?Sized + 'static,
    {
        self.next_sequence_id = self.next_sequence_id.saturating_add(1);
        let sequence_id = self.next_sequence_id;
        let timeout = self.config.timeout;
        let clock = Arc::clone(&self.clock);
        let task_target = Arc::clone(&target);

        debug!(sequence_id, target = %target, "Sending request");
        let started = clock.now();
        let handle = tokio::spawn(async move {
            let outcome = transport.send(&task_target, timeout).await;
            let latency = clock.elapsed(started);
            let record = ResultRecord::from_outcome(sequence_id, task_target, latency, outcome);
            log_outcome(&record);
            record
        });

        PendingDispatch {
            sequence_id,
            target,
            started,
            handle,
        }
    }

    async fn resolve(&self, task: PendingDispatch<C::Instant>) -> ResultRecord {
        match task.handle.await {
            Ok(record) => record,
            Err(err) => {
                let latency = self.clock.elapsed(task.started);
                error!(
                    sequence_id = task.sequence_id,
                    target = %task.target,
                    "Request task failed: {}",
                    err
                );
                ResultRecord::from_outcome(
                    task.sequence_id,
                    task.target,
                    latency,
                    Err(TransportFailure::Unclassified {
                        message: format!("Request task failed: {}", err),
                    }),
                )
            }
        }
    }
}

fn log_outcome(record: &ResultRecord) {
    let latency_ms = record.latency.as_millis();
    match record.error.as_deref() {
        None => debug!(
            sequence_id = record.sequence_id,
            status = record.status_code,
            latency_ms,
            target = %record.target,
            "Done"
        ),
        Some(message) if record.is_fatal() => error!(
            sequence_id = record.sequence_id,
            latency_ms,
            target = %record.target,
            "Fatal: {}",
            message
        ),
        Some(message) => warn!(
            sequence_id = record.sequence_id,
            status = record.status_code,
            latency_ms,
            target = %record.target,
            "Request error: {}",
            message
        ),
    }
}
