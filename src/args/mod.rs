//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
mod test_support;

pub use cli::TesterArgs;
pub use types::{OutputFormat, PositiveU64};

pub use defaults::DEFAULT_USER_AGENT;
pub(crate) use defaults::DEFAULT_CONFIG_FILES;
