//! CLI handler for the `plan` command.

use super::emit;
use crate::cli::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use skillpath_engine::{LearningPlan, OptimizerStrategy, PathOrder, PathPlanner};
use skillpath_state::{load_goal, load_learner, resolve_settings, Dataset, Overrides};
use std::fmt::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct PlanReport {
    learner: String,
    goal: String,
    budget_weeks: i64,
    strategy: OptimizerStrategy,
    order: PathOrder,
    courses: Vec<PlannedCourse>,
    total_weeks: u32,
    total_utility: f64,
}

#[derive(Debug, Serialize)]
struct PlannedCourse {
    id: String,
    title: String,
    duration_weeks: u32,
    utility: f64,
}

impl PlanReport {
    fn new(
        learner: String,
        goal: String,
        strategy: OptimizerStrategy,
        order: PathOrder,
        plan: LearningPlan,
    ) -> Self {
        let courses = plan
            .path
            .courses
            .iter()
            .map(|course| PlannedCourse {
                id: course.id.clone(),
                title: course.title.clone(),
                duration_weeks: course.duration_weeks,
                utility: plan
                    .utilities
                    .get(&course.id)
                    .map(|u| u.utility)
                    .unwrap_or_default(),
            })
            .collect();
        Self {
            learner,
            goal,
            budget_weeks: plan.budget_weeks,
            strategy,
            order,
            courses,
            total_weeks: plan.path.total_weeks,
            total_utility: plan.path.total_utility,
        }
    }
}

fn render_text(report: &PlanReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Learning path for {} toward {} (budget {} weeks, {} optimizer)",
        report.learner, report.goal, report.budget_weeks, report.strategy
    );
    if report.courses.is_empty() {
        let _ = writeln!(out, "  No courses fit the goal within the budget.");
        return out;
    }
    for (position, course) in report.courses.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {:<8} {:<32} {:>3} weeks  utility {:.3}",
            position + 1,
            course.id,
            course.title,
            course.duration_weeks,
            course.utility
        );
    }
    let _ = writeln!(
        out,
        "Total: {} courses, {} weeks, utility {:.3}",
        report.courses.len(),
        report.total_weeks,
        report.total_utility
    );
    out
}

/// Handle the `plan` command.
pub(crate) fn handle_plan_command(
    learner_path: &Path,
    goal_path: &Path,
    overrides: Overrides,
    format: OutputFormat,
) -> Result<()> {
    let settings = resolve_settings(overrides)?;
    let dataset = Dataset::load_or_sample(settings.data_dir.as_deref())?;
    let learner = load_learner(learner_path)?;
    let goal = load_goal(goal_path)?;

    let plan = PathPlanner::new(settings.planner).plan(&learner, &goal, &dataset.courses)?;
    let report = PlanReport::new(
        learner.id,
        goal.title,
        settings.planner.strategy,
        settings.planner.order,
        plan,
    );
    emit(&report, format, render_text)
}
