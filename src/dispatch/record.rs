use std::sync::Arc;
use std::time::Duration;

use super::transport::{TransportFailure, TransportOutcome};

/// Status assigned to transport-level failures that carry no HTTP status.
pub const STATUS_TRANSPORT_ERROR: u16 = 800;
/// Status assigned to failures that could not be classified.
pub const STATUS_FATAL: u16 = 999;

/// Outcome of a single dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub sequence_id: u64,
    pub target: Arc<str>,
    pub latency: Duration,
    pub status_code: u16,
    pub error: Option<String>,
}

impl ResultRecord {
    #[must_use]
    pub fn from_outcome(
        sequence_id: u64,
        target: Arc<str>,
        latency: Duration,
        outcome: TransportOutcome,
    ) -> Self {
        let (status_code, error) = match outcome {
            Ok(status) => (status, None),
            Err(TransportFailure::Status { status, message }) => (status, Some(message)),
            Err(TransportFailure::Transport { message }) => (STATUS_TRANSPORT_ERROR, Some(message)),
            Err(TransportFailure::Unclassified { message }) => (STATUS_FATAL, Some(message)),
        };
        Self {
            sequence_id,
            target,
            latency,
            status_code,
            error,
        }
    }

    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        self.status_code == STATUS_FATAL
    }
}
