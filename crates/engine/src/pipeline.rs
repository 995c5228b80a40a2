//! End-to-end planning: gaps, candidates, utilities, optimization.

use crate::candidates::find_suitable_courses;
use crate::error::Result;
use crate::gaps::{identify_skill_gaps, SkillGaps};
use crate::optimizer::{optimize, OptimizedPath, OptimizerStrategy, PathOrder};
use crate::types::{CareerGoal, Course, LearnerProfile, WEEKS_PER_MONTH};
use crate::utility::{calculate_course_utilities, utility_values, CourseUtilities};
use serde::{Deserialize, Serialize};

/// Knobs for a planning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerOptions {
    /// Months-to-weeks conversion for the goal timeline.
    pub weeks_per_month: u32,
    pub strategy: OptimizerStrategy,
    pub order: PathOrder,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            weeks_per_month: WEEKS_PER_MONTH,
            strategy: OptimizerStrategy::default(),
            order: PathOrder::default(),
        }
    }
}

/// Everything a planning run derived, for callers that want more than the
/// final path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningPlan {
    /// Time budget in weeks.
    pub budget_weeks: i64,
    pub gaps: SkillGaps,
    /// Ids of the courses that were scored, in catalog order.
    pub candidates: Vec<String>,
    pub utilities: CourseUtilities,
    pub path: OptimizedPath,
}

/// Composes gap analysis, candidate filtering, utility scoring and
/// optimization.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathPlanner {
    options: PlannerOptions,
}

impl PathPlanner {
    pub fn new(options: PlannerOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: OptimizerStrategy) -> Self {
        self.options.strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_order(mut self, order: PathOrder) -> Self {
        self.options.order = order;
        self
    }

    #[must_use]
    pub fn options(&self) -> PlannerOptions {
        self.options
    }

    /// Run the full pipeline for one learner and goal.
    pub fn plan(
        &self,
        learner: &LearnerProfile,
        goal: &CareerGoal,
        catalog: &[Course],
    ) -> Result<LearningPlan> {
        let budget_weeks = goal.budget_weeks(self.options.weeks_per_month);
        let gaps = identify_skill_gaps(learner, goal);
        let candidates = find_suitable_courses(catalog, learner, goal, &gaps);
        let utilities = calculate_course_utilities(&candidates, learner, goal, &gaps)?;

        let mut path = optimize(
            self.options.strategy,
            &candidates,
            &utility_values(&utilities),
            budget_weeks,
        )?;
        if self.options.order == PathOrder::Prerequisites {
            path = path.ordered_by_prerequisites();
        }

        tracing::info!(
            target: "skillpath::pipeline",
            learner = %learner.id,
            goal = %goal.title,
            budget_weeks,
            strategy = %self.options.strategy,
            candidates = candidates.len(),
            selected = path.len(),
            "generated learning path"
        );

        Ok(LearningPlan {
            budget_weeks,
            gaps,
            candidates: candidates.into_iter().map(|course| course.id).collect(),
            utilities,
            path,
        })
    }
}

/// Recommend an ordered course list for `learner` toward `goal` with the
/// default options (exact optimizer, insertion order, 4 weeks per month).
pub fn generate_learning_path(
    learner: &LearnerProfile,
    goal: &CareerGoal,
    catalog: &[Course],
) -> Result<OptimizedPath> {
    PathPlanner::default()
        .plan(learner, goal, catalog)
        .map(|plan| plan.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PathError;
    use crate::test_support::course;
    use crate::types::ProficiencyLevel::{Beginner, Intermediate};

    fn catalog() -> Vec<Course> {
        let python = course("PY101", &["Python", "Programming Basics"], Beginner, 6);
        let mut analysis = course("DA201", &["Python", "Data Analysis", "Pandas"], Intermediate, 8);
        analysis.prerequisites = vec!["Python".into()];
        vec![analysis, python]
    }

    fn goal(months: i32) -> CareerGoal {
        CareerGoal::new("Data Analyst", months)
            .with_target("Python", Intermediate)
            .with_target("Data Analysis", Intermediate)
    }

    #[test]
    fn test_generates_path_within_budget() {
        let learner = LearnerProfile::new("l1");
        let path = generate_learning_path(&learner, &goal(4), &catalog()).unwrap();

        assert_eq!(path.len(), 2);
        assert!(path.total_weeks <= 16);
    }

    #[test]
    fn test_short_timeline_limits_path() {
        let learner = LearnerProfile::new("l1");
        let path = generate_learning_path(&learner, &goal(2), &catalog()).unwrap();

        assert_eq!(path.len(), 1);
        assert!(path.total_weeks <= 8);
    }

    #[test]
    fn test_negative_timeline_is_invalid_budget() {
        let learner = LearnerProfile::new("l1");
        assert_eq!(
            generate_learning_path(&learner, &goal(-1), &catalog()),
            Err(PathError::InvalidBudget(-4))
        );
    }

    #[test]
    fn test_prerequisite_order_option() {
        /*
        GIVEN an analysis course listed before the Python course it depends on
        WHEN planning with prerequisite ordering
        THEN the Python course comes first
        */
        let learner = LearnerProfile::new("l1");
        let plan = PathPlanner::default()
            .with_order(PathOrder::Prerequisites)
            .plan(&learner, &goal(4), &catalog())
            .unwrap();

        let ids: Vec<&str> = plan.path.course_ids().collect();
        assert_eq!(ids, vec!["PY101", "DA201"]);
        assert_eq!(plan.budget_weeks, 16);
        assert_eq!(plan.candidates, vec!["DA201", "PY101"]);
        assert_eq!(plan.utilities.len(), 2);
    }

    #[test]
    fn test_nothing_to_learn_gives_empty_path() {
        let learner = LearnerProfile::new("l1")
            .with_skill("Python", Intermediate)
            .with_skill("Data Analysis", Intermediate);
        let path = generate_learning_path(&learner, &goal(4), &catalog()).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_strategies_agree_on_total_utility() {
        let learner = LearnerProfile::new("l1");
        let exact = PathPlanner::default()
            .plan(&learner, &goal(3), &catalog())
            .unwrap();
        let compact = PathPlanner::default()
            .with_strategy(OptimizerStrategy::Compact)
            .plan(&learner, &goal(3), &catalog())
            .unwrap();
        assert!((exact.path.total_utility - compact.path.total_utility).abs() < 1e-9);
    }
}
