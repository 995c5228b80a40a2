//! Set-keyed dynamic program.

use super::{OptimizedPath, PathState, Selectable};
use crate::error::{PathError, Result};
use crate::types::Course;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Chosen-set key: bit `i` is set when candidate `i` is on the path.
type CourseSet = u128;

/// Largest candidate pool the bitset key can represent.
pub const MAX_EXACT_CANDIDATES: usize = CourseSet::BITS as usize;

/// Total states above which a warning is logged.
const STATE_WARN_THRESHOLD: usize = 1 << 20;

/// Choose the utility-maximising subset of `candidates` whose durations fit
/// in `max_weeks`.
///
/// `dp[w]` maps each chosen set with total duration `w` to its best utility
/// and append-ordered path. Layers are insertion-ordered, and a proposal only
/// replaces an existing `(w, set)` entry when it is strictly better, so the
/// first-found state wins ties both inside the table and in the final scan
/// (durations ascending, then insertion order).
///
/// Courses longer than the budget are silently excluded. An empty pool or a
/// zero budget yields an empty path.
pub fn optimize_path(
    candidates: &[Course],
    utilities: &HashMap<String, f64>,
    max_weeks: i64,
) -> Result<OptimizedPath> {
    let selectable = Selectable::prepare(candidates, utilities, max_weeks)?;
    if selectable.courses.len() > MAX_EXACT_CANDIDATES {
        return Err(PathError::CandidatePoolTooLarge {
            count: selectable.courses.len(),
            limit: MAX_EXACT_CANDIDATES,
        });
    }

    let budget = selectable.budget;
    let mut table: Vec<IndexMap<CourseSet, PathState>> =
        (0..=budget).map(|_| IndexMap::new()).collect();
    table[0].insert(0, PathState::empty());

    for weeks in 0..=budget {
        let (done, ahead) = table.split_at_mut(weeks + 1);
        for (&set, state) in &done[weeks] {
            for (index, &utility) in selectable.utilities.iter().enumerate() {
                let bit: CourseSet = 1 << index;
                if set & bit != 0 {
                    continue;
                }
                let next_weeks = weeks + selectable.weeks(index);
                if next_weeks > budget {
                    continue;
                }

                let next_set = set | bit;
                let next_utility = state.utility + utility;
                let layer = &mut ahead[next_weeks - weeks - 1];
                let improves = layer
                    .get(&next_set)
                    .map_or(true, |existing| next_utility > existing.utility);
                if improves {
                    layer.insert(next_set, state.extended(index, next_utility));
                }
            }
        }
    }

    let states: usize = table.iter().map(IndexMap::len).sum();
    if states > STATE_WARN_THRESHOLD {
        tracing::warn!(
            target: "skillpath::optimizer",
            states,
            candidates = selectable.courses.len(),
            "exact optimizer state table is very large; consider the compact strategy"
        );
    }

    let mut best: Option<(usize, &PathState)> = None;
    for (weeks, layer) in table.iter().enumerate() {
        for state in layer.values() {
            if best.map_or(true, |(_, current)| state.utility > current.utility) {
                best = Some((weeks, state));
            }
        }
    }

    let path = match best {
        Some((weeks, state)) => selectable.into_path(state, weeks),
        None => OptimizedPath::default(),
    };

    tracing::debug!(
        target: "skillpath::optimizer",
        strategy = "exact",
        states,
        selected = path.len(),
        total_weeks = path.total_weeks,
        total_utility = path.total_utility,
        "optimized learning path"
    );

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{course, utilities};
    use crate::types::ProficiencyLevel::{Beginner, Intermediate};

    fn scenario() -> Vec<Course> {
        vec![
            course("A", &["Python"], Beginner, 6),
            course("B", &["Data Analysis"], Intermediate, 8),
        ]
    }

    fn ids(path: &OptimizedPath) -> Vec<&str> {
        path.course_ids().collect()
    }

    #[test]
    fn test_both_courses_fit() {
        /*
        GIVEN A (6 weeks, 0.5) and B (8 weeks, 0.7)
        WHEN the budget is 14 weeks
        THEN both are selected in append order with utility 1.2
        */
        let values = utilities(&[("A", 0.5), ("B", 0.7)]);
        let path = optimize_path(&scenario(), &values, 14).unwrap();

        assert_eq!(ids(&path), vec!["A", "B"]);
        assert!((path.total_utility - 1.2).abs() < 1e-12);
        assert_eq!(path.total_weeks, 14);
    }

    #[test]
    fn test_tight_budget_selects_only_what_fits() {
        let values = utilities(&[("A", 0.5), ("B", 0.7)]);
        let path = optimize_path(&scenario(), &values, 6).unwrap();

        assert_eq!(ids(&path), vec!["A"]);
        assert!((path.total_utility - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_candidates_yield_empty_path() {
        let path = optimize_path(&[], &HashMap::new(), 10).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.total_utility, 0.0);
        assert_eq!(path.total_weeks, 0);
    }

    #[test]
    fn test_zero_budget_yields_empty_path() {
        let values = utilities(&[("A", 0.5), ("B", 0.7)]);
        let path = optimize_path(&scenario(), &values, 0).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_negative_budget_is_rejected() {
        let values = utilities(&[("A", 0.5), ("B", 0.7)]);
        assert_eq!(
            optimize_path(&scenario(), &values, -2),
            Err(PathError::InvalidBudget(-2))
        );
    }

    #[test]
    fn test_oversized_course_is_never_selected() {
        let candidates = vec![
            course("HUGE", &["Python"], Beginner, 20),
            course("A", &["Python"], Beginner, 6),
        ];
        let values = utilities(&[("HUGE", 100.0), ("A", 0.1)]);
        let path = optimize_path(&candidates, &values, 10).unwrap();

        assert_eq!(ids(&path), vec!["A"]);
    }

    #[test]
    fn test_ties_prefer_first_found_state() {
        /*
        GIVEN two courses with equal utility and duration
        WHEN only one fits
        THEN the earlier candidate wins the tie
        */
        let candidates = vec![
            course("FIRST", &["Python"], Beginner, 5),
            course("SECOND", &["Python"], Beginner, 5),
        ];
        let values = utilities(&[("FIRST", 0.4), ("SECOND", 0.4)]);
        let path = optimize_path(&candidates, &values, 7).unwrap();

        assert_eq!(ids(&path), vec!["FIRST"]);
    }

    #[test]
    fn test_shorter_duration_wins_utility_tie() {
        let candidates = vec![
            course("LONG", &["Python"], Beginner, 8),
            course("SHORT", &["Python"], Beginner, 4),
        ];
        let values = utilities(&[("LONG", 0.6), ("SHORT", 0.6)]);
        let path = optimize_path(&candidates, &values, 9).unwrap();

        assert_eq!(ids(&path), vec!["SHORT"]);
        assert_eq!(path.total_weeks, 4);
    }

    #[test]
    fn test_prefers_higher_total_over_greedy_pick() {
        let candidates = vec![
            course("BIG", &["Python"], Beginner, 10),
            course("S1", &["SQL"], Beginner, 5),
            course("S2", &["Pandas"], Beginner, 5),
        ];
        let values = utilities(&[("BIG", 0.9), ("S1", 0.5), ("S2", 0.5)]);
        let path = optimize_path(&candidates, &values, 10).unwrap();

        assert_eq!(ids(&path), vec!["S1", "S2"]);
        assert!((path.total_utility - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_duration_candidate_is_invalid() {
        let candidates = vec![course("ZERO", &["Python"], Beginner, 0)];
        let values = utilities(&[("ZERO", 0.5)]);
        assert!(matches!(
            optimize_path(&candidates, &values, 10),
            Err(PathError::InvalidCourse { .. })
        ));
    }

    #[test]
    fn test_pool_larger_than_bitset_is_rejected() {
        let candidates: Vec<Course> = (0..=MAX_EXACT_CANDIDATES)
            .map(|i| course(&format!("C{i}"), &["Python"], Beginner, 1))
            .collect();
        let values: HashMap<String, f64> = candidates
            .iter()
            .map(|c| (c.id.clone(), 0.1))
            .collect();

        assert!(matches!(
            optimize_path(&candidates, &values, 1),
            Err(PathError::CandidatePoolTooLarge { limit, .. }) if limit == MAX_EXACT_CANDIDATES
        ));
    }
}
