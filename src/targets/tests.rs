use super::*;
use crate::error::{AppError, AppResult, DispatchError};
use std::collections::HashSet;
use tempfile::tempdir;

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[test]
fn sequential_yields_targets_in_order_then_stops() -> AppResult<()> {
    let mut selector = TargetSelector::new(names(&["a", "b", "c"]), SelectionMode::Sequential);
    let mut seen = Vec::new();
    while let Some(target) = selector.next_target()? {
        seen.push(target.to_string());
    }
    if seen != ["a", "b", "c"] {
        return Err(AppError::validation(format!("Unexpected order: {:?}", seen)));
    }
    if selector.next_target()?.is_some() {
        return Err(AppError::validation("Expected exhaustion to persist"));
    }
    Ok(())
}

#[test]
fn sequential_effective_limit_is_capped_by_target_count() -> AppResult<()> {
    let selector = TargetSelector::new(names(&["a", "b", "c"]), SelectionMode::Sequential);
    let checks = [(0_u64, 0_u64), (2, 2), (3, 3), (5, 3), (u64::MAX, 3)];
    for (requested, expected) in checks {
        let limit = selector.effective_limit(requested);
        if limit != expected {
            return Err(AppError::validation(format!(
                "requested {}: expected {}, got {}",
                requested, expected, limit
            )));
        }
    }
    Ok(())
}

#[test]
fn random_effective_limit_is_unbounded_by_target_count() -> AppResult<()> {
    let selector = TargetSelector::new(names(&["a"]), SelectionMode::Random);
    if selector.effective_limit(50) == 50 {
        Ok(())
    } else {
        Err(AppError::validation("Random limit must not be clamped"))
    }
}

#[test]
fn random_draws_with_replacement_from_targets() -> AppResult<()> {
    let pool = names(&["a", "b", "c"]);
    let mut selector = TargetSelector::with_seed(pool.clone(), SelectionMode::Random, 42);
    let mut seen = HashSet::new();
    for _ in 0..200 {
        let target = selector
            .next_target()?
            .ok_or_else(|| AppError::validation("Random selection ran dry"))?;
        if !pool.iter().any(|candidate| **candidate == *target) {
            return Err(AppError::validation(format!("Unknown target {}", target)));
        }
        seen.insert(target.to_string());
    }
    if seen.len() == pool.len() {
        Ok(())
    } else {
        Err(AppError::validation(format!(
            "Expected every target drawn in 200 calls, saw {:?}",
            seen
        )))
    }
}

#[test]
fn seeded_random_selection_is_reproducible() -> AppResult<()> {
    let pool = names(&["a", "b", "c", "d"]);
    let mut left = TargetSelector::with_seed(pool.clone(), SelectionMode::Random, 9);
    let mut right = TargetSelector::with_seed(pool, SelectionMode::Random, 9);
    for _ in 0..20 {
        if left.next_target()? != right.next_target()? {
            return Err(AppError::validation("Seeded selectors diverged"));
        }
    }
    Ok(())
}

#[test]
fn random_over_empty_targets_fails() -> AppResult<()> {
    let mut selector = TargetSelector::new(Vec::<String>::new(), SelectionMode::Random);
    match selector.next_target() {
        Err(DispatchError::EmptyTargetSet) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected EmptyTargetSet, got {:?}",
            other
        ))),
    }
}

#[test]
fn sequential_over_empty_targets_yields_nothing() -> AppResult<()> {
    let mut selector = TargetSelector::new(Vec::<String>::new(), SelectionMode::Sequential);
    if selector.effective_limit(10) == 0 && selector.next_target()?.is_none() {
        Ok(())
    } else {
        Err(AppError::validation("Expected no sequential targets"))
    }
}

#[test]
fn parse_targets_skips_blank_and_excluded_lines() -> AppResult<()> {
    let filter = ExcludeFilter::new(&names(&["logout", "admin"]))?;
    let content = "http://a/home\n\n  http://a/logout  \nhttp://a/admin/panel\r\nhttp://a/about\n";

    let parsed = parse_targets(content, &filter);

    if parsed == ["http://a/home", "http://a/about"] {
        Ok(())
    } else {
        Err(AppError::validation(format!("Unexpected targets: {:?}", parsed)))
    }
}

#[test]
fn empty_exclude_list_keeps_everything() -> AppResult<()> {
    let filter = ExcludeFilter::new(&[])?;
    if filter.excludes("http://a/anything") {
        return Err(AppError::validation("Nothing should be excluded"));
    }
    Ok(())
}

#[test]
fn invalid_exclude_pattern_is_reported() -> AppResult<()> {
    match ExcludeFilter::new(&names(&["(unclosed"])) {
        Err(AppError::Validation(crate::error::ValidationError::InvalidExcludePattern {
            ..
        })) => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::validation("Expected invalid pattern error")),
    }
}

#[test]
fn load_targets_reads_file() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("urls.txt");
    std::fs::write(&path, "http://a/1\nhttp://a/2\n")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let targets = runtime.block_on(load_targets(&path, &ExcludeFilter::new(&[])?))?;

    if targets == ["http://a/1", "http://a/2"] {
        Ok(())
    } else {
        Err(AppError::validation(format!("Unexpected targets: {:?}", targets)))
    }
}

#[test]
fn load_targets_reports_missing_file() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("missing.txt");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(load_targets(&path, &ExcludeFilter::new(&[])?)) {
        Err(AppError::Targets(crate::error::TargetsError::NotFound { .. })) => Ok(()),
        Err(err) => Err(AppError::validation(format!("Unexpected error: {}", err))),
        Ok(_) => Err(AppError::validation("Expected NotFound")),
    }
}
