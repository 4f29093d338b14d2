use super::*;
use crate::args::TesterArgs;
use crate::dispatch::{TransportFailure, TransportOutcome};
use crate::error::{AppError, AppResult};
use crate::report::{Category, format_secs};
use crate::targets::SelectionMode;
use async_trait::async_trait;
use clap::Parser;
use std::future::Future;
use std::time::Duration;

/// Answers every request after a fixed delay with a fixed outcome.
struct FixedTransport {
    delay: Duration,
    outcome: TransportOutcome,
}

#[async_trait]
impl Transport for FixedTransport {
    async fn send(&self, _uri: &str, _timeout: Duration) -> TransportOutcome {
        tokio::time::sleep(self.delay).await;
        self.outcome.clone()
    }
}

fn run_paused<F, T>(future: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()?;
    runtime.block_on(future)
}

fn targets() -> Vec<String> {
    vec!["http://a/".to_owned(), "http://b/".to_owned(), "http://c/".to_owned()]
}

fn config(mode: SelectionMode, limit: u64, rate_per_tick: u64) -> DispatchConfig {
    DispatchConfig {
        mode,
        limit,
        rate_per_tick,
        timeout: Duration::from_secs(30),
        seed: Some(7),
    }
}

fn ok_transport(delay_ms: u64) -> Arc<FixedTransport> {
    Arc::new(FixedTransport {
        delay: Duration::from_millis(delay_ms),
        outcome: Ok(200),
    })
}

#[test]
fn sequential_run_reports_each_target_once() -> AppResult<()> {
    let report = run_paused(async {
        Ok(dispatch_and_report(
            targets(),
            ok_transport(100),
            config(SelectionMode::Sequential, 5, 10),
        )
        .await?)
    })?;

    let ok = report
        .bucket(Category::Ok)
        .ok_or_else(|| AppError::validation("Missing OK bucket"))?;
    if report.total().count() != 3 || ok.count() != 3 {
        return Err(AppError::validation(format!(
            "Expected 3 requests, got {}",
            report.total().count()
        )));
    }
    for latency in [ok.latency_avg(), ok.latency_min(), ok.latency_max()] {
        let rendered = latency.map(format_secs);
        if rendered.as_deref() != Some("0.100") {
            return Err(AppError::validation(format!(
                "Expected 0.100 secs, got {:?}",
                rendered
            )));
        }
    }
    Ok(())
}

#[test]
fn random_run_sends_full_limit() -> AppResult<()> {
    let report = run_paused(async {
        Ok(dispatch_and_report(targets(), ok_transport(1), config(SelectionMode::Random, 5, 2)).await?)
    })?;
    if report.total().count() == 5 {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Expected 5 requests, got {}",
            report.total().count()
        )))
    }
}

#[test]
fn failures_land_in_their_categories() -> AppResult<()> {
    let transport = Arc::new(FixedTransport {
        delay: Duration::from_millis(5),
        outcome: Err(TransportFailure::Transport {
            message: "Request timed out".to_owned(),
        }),
    });
    let report = run_paused(async {
        Ok(dispatch_and_report(targets(), transport, config(SelectionMode::Sequential, 3, 5)).await?)
    })?;

    let timeouts = report
        .bucket(Category::Timeout)
        .map(crate::report::StatsBucket::count)
        .unwrap_or_default();
    if timeouts != 3 {
        return Err(AppError::validation(format!("Expected 3 timeouts, got {}", timeouts)));
    }
    if report.total().error_histogram() != [("Request timed out".to_owned(), 3)] {
        return Err(AppError::validation(format!(
            "Unexpected histogram: {:?}",
            report.total().error_histogram()
        )));
    }
    Ok(())
}

#[test]
fn zero_rate_fails_before_dispatch() -> AppResult<()> {
    let result = run_paused(async {
        Ok(dispatch_and_report(targets(), ok_transport(1), config(SelectionMode::Random, 5, 0)).await)
    })?;
    match result {
        Err(DispatchError::InvalidRateConfig) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected InvalidRateConfig, got {:?}",
            other.map(|report| report.total().count())
        ))),
    }
}

#[test]
fn random_over_empty_targets_fails() -> AppResult<()> {
    let result = run_paused(async {
        Ok(dispatch_and_report(Vec::new(), ok_transport(1), config(SelectionMode::Random, 5, 5)).await)
    })?;
    match result {
        Err(DispatchError::EmptyTargetSet) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected EmptyTargetSet, got {:?}",
            other.map(|report| report.total().count())
        ))),
    }
}

#[test]
fn dispatch_config_follows_cli_args() -> AppResult<()> {
    let args = TesterArgs::try_parse_from([
        "linkstress",
        "urls.txt",
        "--seq",
        "-r",
        "3",
        "-u",
        "4",
        "-m",
        "7",
        "-t",
        "250ms",
        "--seed",
        "11",
    ])?;
    let config = dispatch_config(&args);
    if config.mode != SelectionMode::Sequential
        || config.limit != 7
        || config.rate_per_tick != 3
        || config.timeout != Duration::from_millis(250)
        || config.seed != Some(11)
    {
        return Err(AppError::validation(format!("Unexpected config: {:?}", config)));
    }
    Ok(())
}

#[test]
fn dispatch_config_defaults_to_random() -> AppResult<()> {
    let args = TesterArgs::try_parse_from(["linkstress", "urls.txt"])?;
    let config = dispatch_config(&args);
    if config.mode == SelectionMode::Random && config.limit == 50 && config.rate_per_tick == 5 {
        Ok(())
    } else {
        Err(AppError::validation(format!("Unexpected config: {:?}", config)))
    }
}

#[test]
fn sequential_run_renders_total_and_ok_sections() -> AppResult<()> {
    let report = run_paused(async {
        Ok(dispatch_and_report(
            targets(),
            ok_transport(100),
            config(SelectionMode::Sequential, 5, 2),
        )
        .await?)
    })?;
    let lines = report.lines();

    for title in ["---< Total >", "---< 200 OK >"] {
        let section: Vec<&str> = lines
            .iter()
            .skip_while(|line| !line.starts_with(title))
            .skip(1)
            .take(4)
            .map(String::as_str)
            .collect();
        let expected = [
            "  Total Requests: 3",
            "     Latency Ave: 0.100",
            "     Latency Max: 0.100",
            "     Latency Min: 0.100",
        ];
        if section != expected {
            return Err(AppError::validation(format!(
                "Unexpected {} section: {:?}",
                title, section
            )));
        }
    }
    Ok(())
}
