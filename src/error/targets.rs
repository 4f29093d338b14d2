use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TargetsError {
    #[error("Failed to read target file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Target file '{path}' not found.")]
    NotFound { path: PathBuf },
}
