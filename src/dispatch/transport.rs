use std::time::Duration;

use async_trait::async_trait;

/// Result of one transport call: an HTTP status, or one of the failure shapes.
pub type TransportOutcome = Result<u16, TransportFailure>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// The upstream answered, but the transport surfaced the status as an error.
    Status { status: u16, message: String },
    /// Timeouts, refused connections, DNS failures and similar.
    Transport { message: String },
    Unclassified { message: String },
}

/// Capability to send one request to a target URI.
///
/// Implementations must resolve; `timeout` is advisory and enforced by the
/// transport, never by the dispatcher.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, uri: &str, timeout: Duration) -> TransportOutcome;
}
