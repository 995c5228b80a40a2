//! Candidate filtering: which catalog courses are worth scoring at all.

use crate::gaps::SkillGaps;
use crate::types::{CareerGoal, Course, LearnerProfile};

/// Courses that can close at least one open gap.
///
/// A course qualifies when, for some goal skill with a positive gap, it
/// teaches that skill, the learner has not completed it, and its difficulty
/// does not exceed the level the goal requires for that skill. The result is
/// de-duplicated by id and keeps catalog order, which fixes the optimizer's
/// iteration order.
#[must_use]
pub fn find_suitable_courses(
    catalog: &[Course],
    learner: &LearnerProfile,
    goal: &CareerGoal,
    gaps: &SkillGaps,
) -> Vec<Course> {
    let mut seen = std::collections::HashSet::new();
    let candidates: Vec<Course> = catalog
        .iter()
        .filter(|course| !learner.has_completed(&course.id))
        .filter(|course| {
            gaps.open().any(|(skill, _)| {
                course.teaches(skill)
                    && goal
                        .target_skills
                        .get(skill)
                        .is_some_and(|target| course.difficulty <= *target)
            })
        })
        .filter(|course| seen.insert(course.id.clone()))
        .cloned()
        .collect();

    tracing::debug!(
        target: "skillpath::candidates",
        catalog = catalog.len(),
        candidates = candidates.len(),
        "filtered candidate courses"
    );

    candidates
}
