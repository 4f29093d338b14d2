//! Core library for the `linkstress` CLI.
//!
//! The library drives a bounded, rate-paced burst of HTTP requests against a
//! list of target URLs and summarizes the outcomes into per-category latency
//! statistics, a slowest-requests ranking, and an error histogram. The
//! transport is a trait so the dispatch and reporting core can run without a
//! network.
pub mod app;
pub mod args;
pub mod config;
pub mod dispatch;
mod entry;
pub mod error;
pub mod http;
pub mod report;
mod system;
pub mod targets;

pub use app::dispatch_and_report;
pub use entry::run;
