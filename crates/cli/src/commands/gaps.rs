//! CLI handler for the `gaps` command.

use super::emit;
use crate::cli::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use skillpath_engine::{identify_skill_gaps, CareerGoal, LearnerProfile, ProficiencyLevel};
use skillpath_state::{load_goal, load_learner};
use std::fmt::Write;
use std::path::Path;

#[derive(Debug, Serialize)]
struct GapReport {
    learner: String,
    goal: String,
    gaps: Vec<GapRow>,
}

#[derive(Debug, Serialize)]
struct GapRow {
    skill: String,
    current: Option<ProficiencyLevel>,
    target: ProficiencyLevel,
    gap: f64,
}

impl GapReport {
    fn new(learner: &LearnerProfile, goal: &CareerGoal) -> Self {
        let gaps = identify_skill_gaps(learner, goal);
        let rows = goal
            .target_skills
            .iter()
            .map(|(skill, &target)| GapRow {
                skill: skill.clone(),
                current: learner.level_of(skill),
                target,
                gap: gaps.get(skill),
            })
            .collect();
        Self {
            learner: learner.id.clone(),
            goal: goal.title.clone(),
            gaps: rows,
        }
    }
}

fn render_text(report: &GapReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Skill gaps for {} toward {}", report.learner, report.goal);
    for row in &report.gaps {
        let current = row.current.map_or("untouched", ProficiencyLevel::label);
        let _ = writeln!(
            out,
            "  {:<24} {:>12} -> {:<12} gap {:.2}",
            row.skill,
            current,
            row.target.label(),
            row.gap
        );
    }
    out
}

/// Handle the `gaps` command.
pub(crate) fn handle_gaps_command(
    learner_path: &Path,
    goal_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let learner = load_learner(learner_path)?;
    let goal = load_goal(goal_path)?;
    emit(&GapReport::new(&learner, &goal), format, render_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillpath_engine::ProficiencyLevel::{Beginner, Intermediate};

    #[test]
    fn test_report_rows_follow_goal_targets() {
        let learner = LearnerProfile::new("l1").with_skill("Python", Beginner);
        let goal = CareerGoal::new("Data Analyst", 4)
            .with_target("Python", Intermediate)
            .with_target("Data Analysis", Intermediate);

        let report = GapReport::new(&learner, &goal);
        let skills: Vec<&str> = report.gaps.iter().map(|r| r.skill.as_str()).collect();
        assert_eq!(skills, vec!["Data Analysis", "Python"]);
        assert_eq!(report.gaps[0].gap, 1.0);
        assert!((report.gaps[1].gap - 0.25).abs() < 1e-12);
        assert_eq!(report.gaps[1].current, Some(Beginner));

        let text = render_text(&report);
        assert!(text.contains("untouched"));
        assert!(text.contains("gap 0.25"));
    }
}
