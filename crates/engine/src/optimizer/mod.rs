//! Time-budgeted course selection.
//!
//! Both strategies solve the same 0/1 knapsack: items are candidate courses,
//! weight is duration in weeks, value is utility and capacity is the budget.
//!
//! - [`optimize_path`] keys every DP layer by the exact set of chosen courses
//!   (a 128-bit bitset over candidate indices). It reproduces the insertion
//!   order tie-break: among equally good states the one reached first wins,
//!   and the returned courses keep the order in which they were appended.
//!   The state space is exponential in the number of candidates, so it is
//!   only tractable for pools of a few tens of courses.
//! - [`optimize_path_compact`] keys each layer by duration only and runs in
//!   O(candidates × weeks). Its optimum equals the exact one; ties may
//!   resolve to a different, equally good set.
//!
//! Neither strategy orders the result by prerequisites. Use
//! [`order_by_prerequisites`] for that.

mod compact;
mod exact;
mod ordering;

pub use compact::optimize_path_compact;
pub use exact::{optimize_path, MAX_EXACT_CANDIDATES};
pub use ordering::order_by_prerequisites;

use crate::error::{PathError, Result};
use crate::types::Course;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// An ordered, budget-feasible selection of courses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptimizedPath {
    /// Selected courses in path order.
    pub courses: Vec<Course>,
    /// Sum of the selected courses' utilities.
    pub total_utility: f64,
    /// Sum of the selected courses' durations.
    pub total_weeks: u32,
}

impl OptimizedPath {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn course_ids(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(|course| course.id.as_str())
    }

    /// Reorder the path so prerequisite skills are taught first.
    #[must_use]
    pub fn ordered_by_prerequisites(mut self) -> Self {
        self.courses = order_by_prerequisites(&self.courses);
        self
    }
}

/// Which DP formulation to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerStrategy {
    /// Set-keyed DP with insertion-order tie-breaking.
    #[default]
    Exact,
    /// Duration-keyed knapsack.
    Compact,
}

impl OptimizerStrategy {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Compact => "compact",
        }
    }
}

impl fmt::Display for OptimizerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OptimizerStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown optimizer strategy: {other}")),
        }
    }
}

/// How the selected courses are ordered in the final path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathOrder {
    /// Order in which the optimizer appended the courses.
    #[default]
    Insertion,
    /// Stable topological order over prerequisite skills.
    Prerequisites,
}

impl PathOrder {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Prerequisites => "prerequisites",
        }
    }
}

impl fmt::Display for PathOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PathOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "insertion" => Ok(Self::Insertion),
            "prerequisites" | "prereqs" => Ok(Self::Prerequisites),
            other => Err(format!("unknown path order: {other}")),
        }
    }
}

/// Run the optimizer selected by `strategy`.
pub fn optimize(
    strategy: OptimizerStrategy,
    candidates: &[Course],
    utilities: &HashMap<String, f64>,
    max_weeks: i64,
) -> Result<OptimizedPath> {
    match strategy {
        OptimizerStrategy::Exact => optimize_path(candidates, utilities, max_weeks),
        OptimizerStrategy::Compact => optimize_path_compact(candidates, utilities, max_weeks),
    }
}

/// A partial path inside a DP layer.
#[derive(Debug, Clone)]
struct PathState {
    utility: f64,
    /// Indices into [`Selectable::courses`], in append order.
    order: Vec<usize>,
}

impl PathState {
    fn empty() -> Self {
        Self {
            utility: 0.0,
            order: Vec::new(),
        }
    }

    fn extended(&self, index: usize, utility: f64) -> Self {
        let mut order = Vec::with_capacity(self.order.len() + 1);
        order.extend_from_slice(&self.order);
        order.push(index);
        Self { utility, order }
    }
}

/// Candidates that can actually be scheduled under the budget.
struct Selectable<'a> {
    courses: Vec<&'a Course>,
    utilities: Vec<f64>,
    budget: usize,
}

impl<'a> Selectable<'a> {
    /// Validate inputs, drop duplicate ids and courses longer than the budget.
    fn prepare(
        candidates: &'a [Course],
        utilities: &HashMap<String, f64>,
        max_weeks: i64,
    ) -> Result<Self> {
        let budget =
            usize::try_from(max_weeks).map_err(|_| PathError::InvalidBudget(max_weeks))?;

        let mut seen = HashSet::new();
        let mut courses = Vec::new();
        let mut values = Vec::new();
        for course in candidates {
            course.validate()?;
            let utility = utilities
                .get(&course.id)
                .copied()
                .ok_or_else(|| PathError::missing(&course.id, "utility"))?;
            if !seen.insert(course.id.as_str()) {
                continue;
            }
            if course.duration_weeks as usize > budget {
                tracing::trace!(
                    target: "skillpath::optimizer",
                    course = %course.id,
                    weeks = course.duration_weeks,
                    budget,
                    "course exceeds budget"
                );
                continue;
            }
            courses.push(course);
            values.push(utility);
        }

        // No state can exceed the combined duration of every selectable course.
        let reachable: usize = courses
            .iter()
            .map(|course| course.duration_weeks as usize)
            .sum();

        Ok(Self {
            courses,
            utilities: values,
            budget: budget.min(reachable),
        })
    }

    fn weeks(&self, index: usize) -> usize {
        self.courses[index].duration_weeks as usize
    }

    fn into_path(self, state: &PathState, total_weeks: usize) -> OptimizedPath {
        OptimizedPath {
            courses: state
                .order
                .iter()
                .map(|&index| self.courses[index].clone())
                .collect(),
            total_utility: state.utility,
            total_weeks: u32::try_from(total_weeks).unwrap_or(u32::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{course, utilities};
    use crate::types::ProficiencyLevel::Beginner;

    #[test]
    fn test_strategy_and_order_parse() {
        assert_eq!(
            "Exact".parse::<OptimizerStrategy>(),
            Ok(OptimizerStrategy::Exact)
        );
        assert_eq!(
            " compact ".parse::<OptimizerStrategy>(),
            Ok(OptimizerStrategy::Compact)
        );
        assert!("greedy".parse::<OptimizerStrategy>().is_err());

        assert_eq!(
            "prereqs".parse::<PathOrder>(),
            Ok(PathOrder::Prerequisites)
        );
        assert_eq!("insertion".parse::<PathOrder>(), Ok(PathOrder::Insertion));
        assert!("random".parse::<PathOrder>().is_err());
    }

    #[test]
    fn test_prepare_rejects_negative_budget() {
        let err = Selectable::prepare(&[], &HashMap::new(), -1).err();
        assert_eq!(err, Some(PathError::InvalidBudget(-1)));
    }

    #[test]
    fn test_prepare_requires_a_utility_per_candidate() {
        let candidates = vec![course("A", &["Python"], Beginner, 6)];
        let err = Selectable::prepare(&candidates, &HashMap::new(), 10).err();
        assert_eq!(err, Some(PathError::missing("A", "utility")));
    }

    #[test]
    fn test_prepare_drops_duplicates_and_oversized() {
        let candidates = vec![
            course("A", &["Python"], Beginner, 6),
            course("A", &["Python"], Beginner, 2),
            course("BIG", &["Python"], Beginner, 20),
        ];
        let values = utilities(&[("A", 0.5), ("BIG", 0.9)]);
        let selectable = Selectable::prepare(&candidates, &values, 10).unwrap();
        assert_eq!(selectable.courses.len(), 1);
        assert_eq!(selectable.weeks(0), 6);
    }

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let candidates = vec![
            course("A", &["Python"], Beginner, 6),
            course("B", &["Data Analysis"], Beginner, 8),
        ];
        let values = utilities(&[("A", 0.5), ("B", 0.7)]);

        let exact = optimize(OptimizerStrategy::Exact, &candidates, &values, 14).unwrap();
        let compact = optimize(OptimizerStrategy::Compact, &candidates, &values, 14).unwrap();
        assert!((exact.total_utility - compact.total_utility).abs() < 1e-12);
        assert_eq!(exact.total_weeks, 14);
    }
}
