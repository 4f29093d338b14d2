use std::sync::Arc;

use clap::ValueEnum;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Uniform draw with replacement.
    #[default]
    Random,
    /// File order, each target at most once.
    Sequential,
}

/// Yields the next target to dispatch according to the selection mode.
#[derive(Debug)]
pub struct TargetSelector {
    targets: Arc<[Arc<str>]>,
    mode: SelectionMode,
    cursor: usize,
    rng: StdRng,
}

impl TargetSelector {
    #[must_use]
    pub fn new<I, S>(targets: I, mode: SelectionMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self::build(targets, mode, StdRng::from_entropy())
    }

    /// Selector whose random draws are reproducible for a given seed.
    #[must_use]
    pub fn with_seed<I, S>(targets: I, mode: SelectionMode, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self::build(targets, mode, StdRng::seed_from_u64(seed))
    }

    fn build<I, S>(targets: I, mode: SelectionMode, rng: StdRng) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            mode,
            cursor: 0,
            rng,
        }
    }

    /// Number of calls the dispatcher may make for a requested limit.
    /// Sequential selection never yields more calls than there are targets.
    #[must_use]
    pub fn effective_limit(&self, requested: u64) -> u64 {
        match self.mode {
            SelectionMode::Random => requested,
            SelectionMode::Sequential => {
                requested.min(u64::try_from(self.targets.len()).unwrap_or(u64::MAX))
            }
        }
    }

    /// Returns the next target, or `None` once sequential selection is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTargetSet` when random selection has nothing to draw from.
    pub fn next_target(&mut self) -> Result<Option<Arc<str>>, DispatchError> {
        match self.mode {
            SelectionMode::Random => {
                if self.targets.is_empty() {
                    return Err(DispatchError::EmptyTargetSet);
                }
                let idx = self.rng.gen_range(0..self.targets.len());
                Ok(self.targets.get(idx).cloned())
            }
            SelectionMode::Sequential => {
                let target = self.targets.get(self.cursor).cloned();
                if target.is_some() {
                    self.cursor = self.cursor.saturating_add(1);
                }
                Ok(target)
            }
        }
    }
}
