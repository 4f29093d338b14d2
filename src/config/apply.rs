use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, TesterArgs};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to every option not given on the command line.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "file")
        && let Some(file) = config.file.clone()
    {
        args.file = Some(file);
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = timeout.to_duration().map_err(|err| {
            AppError::config(ConfigError::InvalidDuration {
                field: "timeout",
                source: err,
            })
        })?;
    }

    if !is_cli(matches, "rps")
        && let Some(rps) = config.rps
    {
        args.rps = ensure_positive_u64(rps, "rps")?;
    }

    if !is_cli(matches, "duration")
        && let Some(duration) = config.duration
    {
        args.duration = ensure_positive_u64(duration, "duration")?;
    }

    if !is_cli(matches, "max_requests")
        && let Some(max_requests) = config.max_requests
    {
        args.max_requests = Some(ensure_positive_u64(max_requests, "max_requests")?);
    }

    if !is_cli(matches, "sequential")
        && let Some(sequential) = config.sequential
    {
        args.sequential = sequential;
    }

    if !is_cli(matches, "exclude")
        && let Some(exclude) = config.exclude.as_ref()
    {
        args.exclude.clone_from(exclude);
    }

    if !is_cli(matches, "seed")
        && let Some(seed) = config.seed
    {
        args.seed = Some(seed);
    }

    if !is_cli(matches, "top")
        && let Some(top) = config.top
    {
        args.top = top;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
