use std::time::Duration;

use serde::Deserialize;

use crate::args::OutputFormat;
use crate::args::parsers::parse_duration_value;
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub file: Option<String>,
    pub timeout: Option<DurationValue>,
    pub rps: Option<u64>,
    pub duration: Option<u64>,
    pub max_requests: Option<u64>,
    #[serde(alias = "seq")]
    pub sequential: Option<bool>,
    pub exclude: Option<Vec<String>>,
    pub seed: Option<u64>,
    pub top: Option<usize>,
    pub output_format: Option<OutputFormat>,
}

/// Either a bare number of seconds or a `10s`/`500ms` style string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(0) => Err(ValidationError::DurationZero),
            DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
            DurationValue::Text(text) => parse_duration_value(text),
        }
    }
}
