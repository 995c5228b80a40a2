//! Duration-keyed 0/1 knapsack.

use super::{OptimizedPath, PathState, Selectable};
use crate::error::Result;
use crate::types::Course;
use std::collections::HashMap;

/// Choose the utility-maximising subset of `candidates` within `max_weeks`
/// in O(candidates × weeks).
///
/// `best[w]` holds the best path whose durations sum to exactly `w`.
/// Candidates are the outer loop and durations are walked downwards, so each
/// course is used at most once. Ties keep the earlier state, and the final
/// scan prefers the shortest duration among equal utilities.
pub fn optimize_path_compact(
    candidates: &[Course],
    utilities: &HashMap<String, f64>,
    max_weeks: i64,
) -> Result<OptimizedPath> {
    let selectable = Selectable::prepare(candidates, utilities, max_weeks)?;
    let budget = selectable.budget;

    let mut best: Vec<Option<PathState>> = vec![None; budget + 1];
    best[0] = Some(PathState::empty());

    for (index, &utility) in selectable.utilities.iter().enumerate() {
        let weeks = selectable.weeks(index);
        for total in (weeks..=budget).rev() {
            let Some(previous) = best[total - weeks].as_ref() else {
                continue;
            };
            let next_utility = previous.utility + utility;
            if best[total]
                .as_ref()
                .is_some_and(|current| next_utility <= current.utility)
            {
                continue;
            }
            let next = previous.extended(index, next_utility);
            best[total] = Some(next);
        }
    }

    let mut chosen: Option<(usize, &PathState)> = None;
    for (weeks, state) in best.iter().enumerate() {
        let Some(state) = state else {
            continue;
        };
        if chosen.map_or(true, |(_, current)| state.utility > current.utility) {
            chosen = Some((weeks, state));
        }
    }

    let path = match chosen {
        Some((weeks, state)) => selectable.into_path(state, weeks),
        None => OptimizedPath::default(),
    };

    tracing::debug!(
        target: "skillpath::optimizer",
        strategy = "compact",
        selected = path.len(),
        total_weeks = path.total_weeks,
        total_utility = path.total_utility,
        "optimized learning path"
    );

    Ok(path)
}
