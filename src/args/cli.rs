use clap::Parser;
use std::time::Duration;

use super::parsers::{parse_bool_env, parse_duration_arg, parse_positive_u64};
use super::types::{OutputFormat, PositiveU64};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Bursts rate-paced HTTP requests at a list of URLs and reports latency and errors per outcome category."
)]
pub struct TesterArgs {
    /// File with the list of target URLs, one per line
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long, short = 't', default_value = "30s", value_parser = parse_duration_arg)]
    pub timeout: Duration,

    /// Number of requests launched per second
    #[arg(
        long,
        short = 'r',
        default_value = "5",
        value_parser = parse_positive_u64
    )]
    pub rps: PositiveU64,

    /// Duration of the test (seconds)
    #[arg(
        long,
        short = 'u',
        default_value = "10",
        value_parser = parse_positive_u64
    )]
    pub duration: PositiveU64,

    /// Maximum number of requests (capped at rps * duration)
    #[arg(long = "max-requests", short = 'm', value_parser = parse_positive_u64)]
    pub max_requests: Option<PositiveU64>,

    /// Send one request to each URL in file order instead of picking URLs at random
    #[arg(long = "seq", short = 's')]
    pub sequential: bool,

    /// Skip URLs matching this keyword or pattern (repeatable)
    #[arg(long, short = 'e')]
    pub exclude: Vec<String>,

    /// Seed for random URL selection
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of slowest requests listed in the report
    #[arg(long = "top", default_value_t = crate::report::DEFAULT_SLOWEST)]
    pub top: usize,

    /// Report format
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Path to config file (TOML/JSON). Defaults to ./linkstress.toml or ./linkstress.json if present.
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by LINKSTRESS_LOG/RUST_LOG)
    #[arg(long, short = 'D', alias = "debug")]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}

impl TesterArgs {
    /// Total requests for the run: `rps * duration`, lowered to
    /// `--max-requests` when that is smaller.
    #[must_use]
    pub fn request_limit(&self) -> u64 {
        let budget = self.rps.get().saturating_mul(self.duration.get());
        self.max_requests
            .map_or(budget, |max| max.get().min(budget))
    }
}
