//! Target list loading, exclusion filtering, and selection.
mod selector;
mod source;

#[cfg(test)]
mod tests;

pub use selector::{SelectionMode, TargetSelector};
pub use source::{ExcludeFilter, load_targets, parse_targets};
