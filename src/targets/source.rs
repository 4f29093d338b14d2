use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::error::{AppError, AppResult, TargetsError, ValidationError};

/// Drops targets matching any of the configured keywords.
#[derive(Debug, Clone)]
pub struct ExcludeFilter {
    pattern: Option<Regex>,
}

impl ExcludeFilter {
    /// Builds a filter from exclusion keywords; the keywords are joined as a
    /// regex alternation.
    ///
    /// # Errors
    ///
    /// Returns an error when the joined pattern is not a valid regex.
    pub fn new(keywords: &[String]) -> AppResult<Self> {
        if keywords.is_empty() {
            return Ok(Self { pattern: None });
        }
        let joined = format!("({})", keywords.join("|"));
        let pattern = Regex::new(&joined).map_err(|err| {
            AppError::validation(ValidationError::InvalidExcludePattern {
                pattern: joined.clone(),
                source: err,
            })
        })?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }

    #[must_use]
    pub fn excludes(&self, target: &str) -> bool {
        self.pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(target))
    }
}

/// Splits newline-delimited content into targets, skipping blank and excluded
/// lines.
#[must_use]
pub fn parse_targets(content: &str, filter: &ExcludeFilter) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| {
            let excluded = filter.excludes(line);
            if excluded {
                debug!("Excluding target {}", line);
            }
            !excluded
        })
        .map(str::to_owned)
        .collect()
}

/// Reads and filters the target list at `path`.
///
/// # Errors
///
/// Returns an error when the file is missing or cannot be read.
pub async fn load_targets(path: &Path, filter: &ExcludeFilter) -> AppResult<Vec<String>> {
    if !path.exists() {
        return Err(AppError::targets(TargetsError::NotFound {
            path: path.to_path_buf(),
        }));
    }
    let content = tokio::fs::read_to_string(path).await.map_err(|err| {
        AppError::targets(TargetsError::Read {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    Ok(parse_targets(&content, filter))
}
