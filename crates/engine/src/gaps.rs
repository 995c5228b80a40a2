//! Skill gap analysis between a learner and a career goal.

use crate::types::{CareerGoal, LearnerProfile, ProficiencyLevel, Score};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-skill gap scores for one (learner, goal) pair.
///
/// Only skills required by the goal have an entry. Lookups for any other
/// skill return 0.0 rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillGaps(BTreeMap<String, Score>);

impl SkillGaps {
    /// Gap for `skill`, 0.0 when the goal does not mention it.
    #[must_use]
    pub fn get(&self, skill: &str) -> f64 {
        self.0.get(skill).map(Score::value).unwrap_or(0.0)
    }

    #[must_use]
    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains_key(skill)
    }

    /// Skills in name order with their gap.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(skill, gap)| (skill.as_str(), gap.value()))
    }

    /// Skills with a strictly positive gap.
    pub fn open(&self) -> impl Iterator<Item = (&str, f64)> {
        self.iter().filter(|(_, gap)| *gap > 0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for SkillGaps {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(skill, gap)| (skill, Score::new(gap)))
                .collect(),
        )
    }
}

/// Gap for a single skill.
///
/// `current` is `None` when the learner never touched the skill, which is
/// always a full gap.
#[must_use]
pub fn skill_gap(current: Option<ProficiencyLevel>, target: ProficiencyLevel) -> Score {
    let Some(current) = current else {
        return Score::full();
    };
    let deficit = f64::from(target.ordinal()) - f64::from(current.ordinal());
    Score::new(deficit / f64::from(ProficiencyLevel::max_ordinal()))
}

/// Compare a learner's levels against the goal's required levels.
#[must_use]
pub fn identify_skill_gaps(learner: &LearnerProfile, goal: &CareerGoal) -> SkillGaps {
    let gaps: SkillGaps = goal
        .target_skills
        .iter()
        .map(|(skill, target)| {
            let gap = skill_gap(learner.level_of(skill), *target);
            (skill.clone(), gap.value())
        })
        .collect();

    tracing::debug!(
        target: "skillpath::gaps",
        learner = %learner.id,
        required = gaps.len(),
        open = gaps.open().count(),
        "identified skill gaps"
    );

    gaps
}
