//! Rate-paced request dispatch: pacing, concurrency, and outcome capture.
mod clock;
mod dispatcher;
mod record;
mod transport;


pub use clock::{Clock, MonotonicClock};
pub use dispatcher::{DispatchConfig, Dispatcher, PACING_INTERVAL};
pub use record::{ResultRecord, STATUS_FATAL, STATUS_TRANSPORT_ERROR};
pub use transport::{Transport, TransportFailure, TransportOutcome};
