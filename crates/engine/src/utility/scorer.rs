//! Multi-signal utility scoring.

use super::{CourseUtilities, CourseUtility, UtilityBreakdown};
use crate::error::Result;
use crate::gaps::SkillGaps;
use crate::types::{CareerGoal, Course, LearnerProfile, ProficiencyLevel, Score};

/// Weights for the utility components. They sum to 1.0.
pub(super) const COVERAGE_WEIGHT: f64 = 0.40;
pub(super) const DIFFICULTY_WEIGHT: f64 = 0.20;
pub(super) const RELEVANCE_WEIGHT: f64 = 0.25;
pub(super) const PREREQUISITE_WEIGHT: f64 = 0.15;

/// Trait for computing a course's utility.
pub trait Scorer {
    /// Score a single candidate course.
    fn score(&self, course: &Course) -> Result<CourseUtility>;
}

/// Scores courses for one learner against one goal.
#[derive(Debug, Clone, Copy)]
pub struct GoalUtilityScorer<'a> {
    learner: &'a LearnerProfile,
    goal: &'a CareerGoal,
    gaps: &'a SkillGaps,
}

impl<'a> GoalUtilityScorer<'a> {
    pub fn new(learner: &'a LearnerProfile, goal: &'a CareerGoal, gaps: &'a SkillGaps) -> Self {
        Self {
            learner,
            goal,
            gaps,
        }
    }

    /// Mean gap over the course's required skills.
    fn skill_coverage(&self, course: &Course) -> Score {
        let total: f64 = course.skills.iter().map(|skill| self.gaps.get(skill)).sum();
        Score::new(total / course.skills.len() as f64)
    }

    /// The learner's typical tier across the course's skills, rounded to the
    /// nearest level. Untouched skills count as [`ProficiencyLevel::None`].
    fn typical_tier(&self, course: &Course) -> ProficiencyLevel {
        let total: u32 = course
            .skills
            .iter()
            .map(|skill| {
                u32::from(
                    self.learner
                        .level_of(skill)
                        .unwrap_or_default()
                        .ordinal(),
                )
            })
            .sum();
        let mean = f64::from(total) / course.skills.len() as f64;
        ProficiencyLevel::from_ordinal(mean.round() as u8).unwrap_or_default()
    }

    /// Closeness between the course tier and the learner's typical tier.
    ///
    /// Symmetric around a perfect match and decreasing with tier distance.
    fn difficulty_match(&self, course: &Course) -> Score {
        let distance = course.difficulty.distance(self.typical_tier(course));
        Score::new(1.0 - f64::from(distance) / ProficiencyLevel::COUNT as f64)
    }

    /// Share of the course's skills that appear in the goal.
    fn career_relevance(&self, course: &Course) -> Score {
        let relevant = course
            .skills
            .iter()
            .filter(|skill| self.goal.requires(skill))
            .count();
        Score::new(relevant as f64 / course.skills.len() as f64)
    }

    /// Share of prerequisites the learner already holds at some level.
    fn prerequisite_efficiency(&self, course: &Course) -> Score {
        if course.prerequisites.is_empty() {
            return Score::full();
        }
        let satisfied = course
            .prerequisites
            .iter()
            .filter(|skill| {
                self.learner
                    .level_of(skill)
                    .is_some_and(|level| level > ProficiencyLevel::None)
            })
            .count();
        Score::new(satisfied as f64 / course.prerequisites.len() as f64)
    }
}

impl Scorer for GoalUtilityScorer<'_> {
    fn score(&self, course: &Course) -> Result<CourseUtility> {
        course.validate()?;

        let breakdown = UtilityBreakdown {
            skill_coverage: self.skill_coverage(course).value(),
            difficulty_match: self.difficulty_match(course).value(),
            career_relevance: self.career_relevance(course).value(),
            prerequisite_efficiency: self.prerequisite_efficiency(course).value(),
        };

        tracing::trace!(
            target: "skillpath::utility",
            course = %course.id,
            coverage = breakdown.skill_coverage,
            difficulty = breakdown.difficulty_match,
            relevance = breakdown.career_relevance,
            prerequisites = breakdown.prerequisite_efficiency,
            "scored course"
        );

        Ok(CourseUtility {
            course_id: course.id.clone(),
            utility: breakdown.total(),
            breakdown,
        })
    }
}

/// Score every candidate. Fails on the first invalid course.
pub fn calculate_course_utilities(
    candidates: &[Course],
    learner: &LearnerProfile,
    goal: &CareerGoal,
    gaps: &SkillGaps,
) -> Result<CourseUtilities> {
    let scorer = GoalUtilityScorer::new(learner, goal, gaps);
    candidates
        .iter()
        .map(|course| scorer.score(course).map(|u| (course.id.clone(), u)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use crate::gaps::identify_skill_gaps;
    use crate::test_support::course;
    use crate::types::ProficiencyLevel::{Advanced, Beginner, Expert, Intermediate};

    fn goal() -> CareerGoal {
        CareerGoal::new("Data Analyst", 6)
            .with_target("Python", Intermediate)
            .with_target("Data Analysis", Advanced)
    }

    #[test]
    fn test_weights_sum_to_one() {
        let sum = COVERAGE_WEIGHT + DIFFICULTY_WEIGHT + RELEVANCE_WEIGHT + PREREQUISITE_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_gap_single_skill_has_full_coverage() {
        /*
        GIVEN gaps = {Python: 1.0}
        WHEN scoring a course that only requires Python
        THEN skill coverage is exactly 1.0
        */
        let gaps: SkillGaps = [("Python".to_string(), 1.0)].into_iter().collect();
        let learner = LearnerProfile::new("l1");
        let goal = goal();
        let scorer = GoalUtilityScorer::new(&learner, &goal, &gaps);

        let utility = scorer.score(&course("PY101", &["Python"], Beginner, 6)).unwrap();
        assert_eq!(utility.breakdown.skill_coverage, 1.0);
    }

    #[test]
    fn test_missing_gap_counts_as_zero_coverage() {
        let gaps: SkillGaps = [("Python".to_string(), 1.0)].into_iter().collect();
        let learner = LearnerProfile::new("l1");
        let goal = goal();
        let scorer = GoalUtilityScorer::new(&learner, &goal, &gaps);

        let utility = scorer
            .score(&course("MIX", &["Python", "Cooking"], Beginner, 6))
            .unwrap();
        assert!((utility.breakdown.skill_coverage - 0.5).abs() < 1e-12);
        assert!((utility.breakdown.career_relevance - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_skills_is_invalid() {
        let gaps = SkillGaps::default();
        let learner = LearnerProfile::new("l1");
        let goal = goal();
        let scorer = GoalUtilityScorer::new(&learner, &goal, &gaps);

        let err = scorer.score(&course("EMPTY", &[], Beginner, 4)).unwrap_err();
        assert!(matches!(err, PathError::InvalidCourse { ref id, .. } if id == "EMPTY"));
    }

    #[test]
    fn test_difficulty_match_peaks_at_learner_tier() {
        let learner = LearnerProfile::new("l1").with_skill("Python", Intermediate);
        let goal = goal();
        let gaps = identify_skill_gaps(&learner, &goal);
        let scorer = GoalUtilityScorer::new(&learner, &goal, &gaps);

        let exact = scorer
            .score(&course("A", &["Python"], Intermediate, 4))
            .unwrap();
        let below = scorer.score(&course("B", &["Python"], Beginner, 4)).unwrap();
        let above = scorer.score(&course("C", &["Python"], Advanced, 4)).unwrap();
        let far = scorer.score(&course("D", &["Python"], Expert, 4)).unwrap();

        assert_eq!(exact.breakdown.difficulty_match, 1.0);
        assert_eq!(
            below.breakdown.difficulty_match,
            above.breakdown.difficulty_match
        );
        assert!(above.breakdown.difficulty_match > far.breakdown.difficulty_match);
    }

    #[test]
    fn test_prerequisite_efficiency() {
        let learner = LearnerProfile::new("l1")
            .with_skill("Python", Beginner)
            .with_skill("Statistics", ProficiencyLevel::None);
        let goal = goal();
        let gaps = identify_skill_gaps(&learner, &goal);
        let scorer = GoalUtilityScorer::new(&learner, &goal, &gaps);

        let no_prereqs = scorer.score(&course("A", &["Python"], Beginner, 4)).unwrap();
        assert_eq!(no_prereqs.breakdown.prerequisite_efficiency, 1.0);

        let mut gated = course("B", &["Data Analysis"], Intermediate, 8);
        gated.prerequisites = vec!["Python".into(), "Statistics".into()];
        let gated = scorer.score(&gated).unwrap();
        assert!((gated.breakdown.prerequisite_efficiency - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_utility_is_weighted_sum() {
        let learner = LearnerProfile::new("l1");
        let goal = goal();
        let gaps = identify_skill_gaps(&learner, &goal);
        let scorer = GoalUtilityScorer::new(&learner, &goal, &gaps);

        // Untouched learner: typical tier None, course Beginner -> 1 - 1/5.
        let utility = scorer.score(&course("PY101", &["Python"], Beginner, 6)).unwrap();
        let expected = 0.40 * 1.0 + 0.20 * 0.8 + 0.25 * 1.0 + 0.15 * 1.0;
        assert!((utility.utility - expected).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&utility.utility));
    }

    #[test]
    fn test_calculate_course_utilities_keys_by_id() {
        let learner = LearnerProfile::new("l1");
        let goal = goal();
        let gaps = identify_skill_gaps(&learner, &goal);
        let candidates = vec![
            course("PY101", &["Python"], Beginner, 6),
            course("DA201", &["Python", "Data Analysis"], Intermediate, 8),
        ];

        let utilities = calculate_course_utilities(&candidates, &learner, &goal, &gaps).unwrap();
        assert_eq!(utilities.len(), 2);
        assert_eq!(utilities["DA201"].course_id, "DA201");
    }

    #[test]
    fn test_calculate_course_utilities_fails_fast() {
        let learner = LearnerProfile::new("l1");
        let goal = goal();
        let gaps = identify_skill_gaps(&learner, &goal);
        let candidates = vec![
            course("PY101", &["Python"], Beginner, 6),
            course("ZERO", &["Python"], Beginner, 0),
        ];

        assert!(matches!(
            calculate_course_utilities(&candidates, &learner, &goal, &gaps),
            Err(PathError::InvalidCourse { .. })
        ));
    }
}
