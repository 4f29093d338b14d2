use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Response};
use url::Url;

use crate::args::DEFAULT_USER_AGENT;
use crate::dispatch::{Transport, TransportFailure, TransportOutcome};
use crate::error::{AppError, AppResult, HttpError};

/// Sends GET requests through a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a transport with the default user agent and redirect policy.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new() -> AppResult<Self> {
        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, uri: &str, timeout: Duration) -> TransportOutcome {
        let url = Url::parse(uri).map_err(|err| TransportFailure::Unclassified {
            message: format!("Invalid URL: {}", err),
        })?;
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| classify_error(&err))?;

        let status = response.status();
        drain_response_body(response)
            .await
            .map_err(|err| classify_error(&err))?;

        if status.is_client_error() || status.is_server_error() {
            return Err(TransportFailure::Status {
                status: status.as_u16(),
                message: format!("HTTP status {}", status),
            });
        }
        Ok(status.as_u16())
    }
}

async fn drain_response_body(response: Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}

fn classify_error(err: &reqwest::Error) -> TransportFailure {
    if let Some(status) = err.status() {
        return TransportFailure::Status {
            status: status.as_u16(),
            message: format!("HTTP status {}", status),
        };
    }
    if err.is_timeout() {
        return TransportFailure::Transport {
            message: "Request timed out".to_owned(),
        };
    }
    if err.is_connect() || err.is_request() || err.is_body() {
        return TransportFailure::Transport {
            message: root_cause(err),
        };
    }
    TransportFailure::Unclassified {
        message: root_cause(err),
    }
}

// Innermost cause, without the URL the outer reqwest message embeds.
fn root_cause(err: &reqwest::Error) -> String {
    let mut current: &dyn std::error::Error = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
