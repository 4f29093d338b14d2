use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::args::{OutputFormat, TesterArgs};
use crate::dispatch::DispatchConfig;
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::ReqwestTransport;
use crate::report::{Aggregator, Report};
use crate::targets::{ExcludeFilter, SelectionMode, load_targets};

use super::dispatch_into;

/// Loads the target file, runs the dispatch, and prints the report.
///
/// # Errors
///
/// Returns an error when the target file cannot be loaded, the exclusion
/// pattern is invalid, the HTTP client cannot be built, or a dispatch
/// precondition fails.
pub async fn run_local(args: &TesterArgs) -> AppResult<()> {
    let path = args
        .file
        .as_deref()
        .ok_or_else(|| AppError::validation(ValidationError::MissingTargetFile))?;
    let filter = ExcludeFilter::new(&args.exclude)?;
    let targets = load_targets(Path::new(path), &filter).await?;
    info!("Loaded {} targets from {}", targets.len(), path);

    let config = dispatch_config(args);
    debug!(?config, output = %args.output_format, "Dispatch configuration");

    let transport = Arc::new(ReqwestTransport::new()?);
    let report = dispatch_into(targets, transport, config, Aggregator::with_slowest(args.top))
        .await
        .inspect_err(|err| tracing::error!("{}", err))?;

    print_report(&report, args.output_format)
}

#[must_use]
pub fn dispatch_config(args: &TesterArgs) -> DispatchConfig {
    DispatchConfig {
        mode: if args.sequential {
            SelectionMode::Sequential
        } else {
            SelectionMode::Random
        },
        limit: args.request_limit(),
        rate_per_tick: args.rps.get(),
        timeout: args.timeout,
        seed: args.seed,
    }
}

/// # Errors
///
/// Returns an error when the JSON report cannot be serialized.
pub fn print_report(report: &Report, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", report.render_json()?),
    }
    Ok(())
}
