//! Learning path planning for career goals.
//!
//! This crate provides:
//! - Skill feature vectors from market demand data
//! - Pairwise course similarity over a catalog
//! - Skill gap analysis between a learner profile and a career goal
//! - Goal-aware course utility scoring
//! - Time-budgeted path optimization (exact and compact knapsack)
//! - Versioned catalog snapshots for concurrent readers
//!
//! The crate performs no I/O. Loading datasets and configuration lives in
//! `skillpath-state`.

pub mod candidates;
pub mod error;
pub mod features;
pub mod gaps;
pub mod optimizer;
pub mod pipeline;
pub mod similarity;
pub mod snapshot;
pub mod types;
pub mod utility;

#[cfg(test)]
mod test_support;

pub use candidates::find_suitable_courses;
pub use error::{PathError, Result};
pub use features::{build_skill_vectors, DemandRecord, SkillFeatureVector, SkillVectors};
pub use gaps::{identify_skill_gaps, skill_gap, SkillGaps};
pub use optimizer::{
    optimize, optimize_path, optimize_path_compact, order_by_prerequisites, OptimizedPath,
    OptimizerStrategy, PathOrder, MAX_EXACT_CANDIDATES,
};
pub use pipeline::{generate_learning_path, LearningPlan, PathPlanner, PlannerOptions};
pub use similarity::{build_course_similarity, course_similarity, SimilarityMatrix};
pub use snapshot::{CatalogHandle, CatalogSnapshot};
pub use types::{
    CareerGoal, Course, CourseRecord, DifficultyTier, LearnerProfile, ProficiencyLevel, Score,
    Skill, WEEKS_PER_MONTH,
};
pub use utility::{
    calculate_course_utilities, utility_values, CourseUtilities, CourseUtility,
    GoalUtilityScorer, Scorer, UtilityBreakdown,
};
