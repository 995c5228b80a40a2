//! Course utility toward a career goal, combining four bounded signals.

mod scorer;

pub use scorer::{calculate_course_utilities, GoalUtilityScorer, Scorer};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Utility per course id for one (learner, goal) pair.
pub type CourseUtilities = HashMap<String, CourseUtility>;

/// Scalar utility with the sub-scores it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseUtility {
    /// Course id.
    pub course_id: String,
    /// Weighted utility (0.0 - 1.0).
    pub utility: f64,
    /// Breakdown of the weighted components.
    pub breakdown: UtilityBreakdown,
}

/// The four sub-scores behind a utility, each clamped to [0.0, 1.0].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UtilityBreakdown {
    /// Mean gap over the course's skills.
    pub skill_coverage: f64,
    /// Closeness of the course tier to the learner's typical tier.
    pub difficulty_match: f64,
    /// Share of the course's skills that the goal targets.
    pub career_relevance: f64,
    /// Share of prerequisites the learner already holds.
    pub prerequisite_efficiency: f64,
}

impl UtilityBreakdown {
    /// Weighted combination of the sub-scores.
    #[must_use]
    pub fn total(&self) -> f64 {
        scorer::COVERAGE_WEIGHT * self.skill_coverage
            + scorer::DIFFICULTY_WEIGHT * self.difficulty_match
            + scorer::RELEVANCE_WEIGHT * self.career_relevance
            + scorer::PREREQUISITE_WEIGHT * self.prerequisite_efficiency
    }
}

/// Flatten utilities into the id-to-value map consumed by the optimizer.
#[must_use]
pub fn utility_values(utilities: &CourseUtilities) -> HashMap<String, f64> {
    utilities
        .iter()
        .map(|(id, utility)| (id.clone(), utility.utility))
        .collect()
}
