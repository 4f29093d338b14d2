//! Dispatch-then-report orchestration.
mod local;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::dispatch::{DispatchConfig, Dispatcher, Transport};
use crate::error::DispatchError;
use crate::report::{Aggregator, Report};

pub use local::{dispatch_config, print_report, run_local};

/// Dispatches against `targets` and aggregates the outcomes with the default
/// slowest-K size.
///
/// # Errors
///
/// Returns a precondition error (`InvalidRateConfig`, `EmptyTargetSet`)
/// before any request is sent. Request failures never fail the call.
pub async fn dispatch_and_report<T>(
    targets: Vec<String>,
    transport: Arc<T>,
    config: DispatchConfig,
) -> Result<Report, DispatchError>
where
    T: Transport + ?Sized + 'static,
{
    dispatch_into(targets, transport, config, Aggregator::new()).await
}

/// Like [`dispatch_and_report`], feeding a caller-configured aggregator.
///
/// # Errors
///
/// Returns a precondition error before any request is sent.
pub async fn dispatch_into<T>(
    targets: Vec<String>,
    transport: Arc<T>,
    config: DispatchConfig,
    mut aggregator: Aggregator,
) -> Result<Report, DispatchError>
where
    T: Transport + ?Sized + 'static,
{
    let mut dispatcher = Dispatcher::new(config)?;
    let records = dispatcher.run(targets, transport).await?;
    aggregator.extend(&records);
    Ok(aggregator.finish())
}
