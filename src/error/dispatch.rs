use thiserror::Error;

/// Precondition failures raised before any request is dispatched.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Target list is empty; random selection needs at least one target.")]
    EmptyTargetSet,
    #[error("Requests per tick must be >= 1.")]
    InvalidRateConfig,
}
