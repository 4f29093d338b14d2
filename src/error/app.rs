use thiserror::Error;

use super::{ConfigError, DispatchError, HttpError, TargetsError, ValidationError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("CLI error: {source}")]
    Clap {
        #[from]
        source: clap::Error,
    },
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),
    #[error("Target list error: {0}")]
    Targets(#[from] TargetsError),
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation<E>(error: E) -> Self
    where
        E: Into<ValidationError>,
    {
        error.into().into()
    }

    pub fn config<E>(error: E) -> Self
    where
        E: Into<ConfigError>,
    {
        error.into().into()
    }

    pub fn dispatch<E>(error: E) -> Self
    where
        E: Into<DispatchError>,
    {
        error.into().into()
    }

    pub fn targets<E>(error: E) -> Self
    where
        E: Into<TargetsError>,
    {
        error.into().into()
    }

    pub fn http<E>(error: E) -> Self
    where
        E: Into<HttpError>,
    {
        error.into().into()
    }
}
