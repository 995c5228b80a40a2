//! Data model shared across engine modules.

use crate::error::{PathError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Score clamped to the [0.0, 1.0] range.
///
/// Gap scores, similarity entries and utility sub-scores all pass through this
/// newtype before they are combined, so a single runaway feature cannot
/// dominate a weighted sum.
///
/// # Examples
///
/// ```
/// use skillpath_engine::Score;
///
/// let s = Score::new(0.75);
/// assert_eq!(s.value(), 0.75);
///
/// assert_eq!(Score::new(1.5).value(), 1.0);
/// assert_eq!(Score::new(-0.5).value(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Create a new score, clamping the value to [0.0, 1.0].
    ///
    /// NaN maps to zero.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the inner value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// A zero score.
    #[must_use]
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// A full score (1.0).
    #[must_use]
    pub fn full() -> Self {
        Self(1.0)
    }
}

impl Default for Score {
    fn default() -> Self {
        Self(0.0)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Ordinal proficiency scale, also used for course difficulty tiers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ProficiencyLevel {
    #[default]
    None,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Course difficulty shares the proficiency scale.
pub type DifficultyTier = ProficiencyLevel;

impl ProficiencyLevel {
    /// Every level in ascending order.
    pub const ALL: [ProficiencyLevel; 5] = [
        Self::None,
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    /// Number of levels on the scale.
    pub const COUNT: usize = Self::ALL.len();

    /// Consecutive integer encoding starting at 0.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Ordinal of the highest level.
    #[must_use]
    pub fn max_ordinal() -> u8 {
        Self::Expert.ordinal()
    }

    #[must_use]
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// Absolute distance between two levels on the ordinal scale.
    #[must_use]
    pub fn distance(self, other: Self) -> u8 {
        self.ordinal().abs_diff(other.ordinal())
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for ProficiencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProficiencyLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown proficiency level: {s}"))
    }
}

/// A learner's assessed skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Skill name (unique within a profile).
    pub name: String,
    /// Assessed proficiency.
    pub level: ProficiencyLevel,
    /// When the skill was last assessed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_assessed: Option<DateTime<Utc>>,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: ProficiencyLevel) -> Self {
        Self {
            name: name.into(),
            level,
            last_assessed: None,
        }
    }
}

/// Immutable catalog course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course id.
    pub id: String,
    pub title: String,
    /// Required skill names, in catalog order.
    pub skills: Vec<String>,
    pub difficulty: DifficultyTier,
    /// Duration in weeks.
    pub duration_weeks: u32,
    /// Rating on a 0-5 scale.
    pub rating: f64,
    /// Historical completion rate (0-1).
    pub completion_rate: f64,
    /// Prerequisite skill names.
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Reject courses that cannot be scored or scheduled.
    pub fn validate(&self) -> Result<()> {
        if self.skills.is_empty() {
            return Err(PathError::invalid_course(
                &self.id,
                "course has no required skills",
            ));
        }
        if self.duration_weeks == 0 {
            return Err(PathError::invalid_course(
                &self.id,
                "duration must be positive",
            ));
        }
        Ok(())
    }

    /// Whether this course lists `skill` among its required skills.
    #[must_use]
    pub fn teaches(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }
}

/// Raw catalog record as handed over by the catalog collaborator.
///
/// Numeric fields are optional on the wire; conversion into [`Course`]
/// reports the first absent one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub difficulty: DifficultyTier,
    pub duration_weeks: Option<i64>,
    pub rating: Option<f64>,
    pub completion_rate: Option<f64>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl TryFrom<CourseRecord> for Course {
    type Error = PathError;

    fn try_from(record: CourseRecord) -> Result<Self> {
        let duration = record
            .duration_weeks
            .ok_or_else(|| PathError::missing(&record.id, "duration_weeks"))?;
        let rating = record
            .rating
            .ok_or_else(|| PathError::missing(&record.id, "rating"))?;
        let completion_rate = record
            .completion_rate
            .ok_or_else(|| PathError::missing(&record.id, "completion_rate"))?;
        let duration_weeks = u32::try_from(duration)
            .ok()
            .filter(|weeks| *weeks > 0)
            .ok_or_else(|| {
                PathError::invalid_course(
                    &record.id,
                    format!("duration must be positive, got {duration}"),
                )
            })?;

        let course = Course {
            id: record.id,
            title: record.title,
            skills: record.skills,
            difficulty: record.difficulty,
            duration_weeks,
            rating,
            completion_rate,
            prerequisites: record.prerequisites,
        };
        course.validate()?;
        Ok(course)
    }
}

/// A learner's current skills and course history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearnerProfile {
    pub id: String,
    #[serde(default)]
    pub skills: Vec<Skill>,
    /// Ids of courses the learner has finished.
    #[serde(default)]
    pub completed_courses: Vec<String>,
}

impl LearnerProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Add or replace a skill.
    pub fn with_skill(mut self, name: impl Into<String>, level: ProficiencyLevel) -> Self {
        let skill = Skill::new(name, level);
        match self.skills.iter_mut().find(|s| s.name == skill.name) {
            Some(existing) => *existing = skill,
            None => self.skills.push(skill),
        }
        self
    }

    /// Mark a course as completed.
    pub fn with_completed(mut self, course_id: impl Into<String>) -> Self {
        self.completed_courses.push(course_id.into());
        self
    }

    /// Assessed level for `skill`, or `None` if the learner never touched it.
    #[must_use]
    pub fn level_of(&self, skill: &str) -> Option<ProficiencyLevel> {
        self.skills.iter().find(|s| s.name == skill).map(|s| s.level)
    }

    #[must_use]
    pub fn has_completed(&self, course_id: &str) -> bool {
        self.completed_courses.iter().any(|c| c == course_id)
    }
}

/// Career goal: target skills with required levels and a timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerGoal {
    #[serde(default)]
    pub title: String,
    /// Required level per target skill.
    pub target_skills: BTreeMap<String, ProficiencyLevel>,
    /// Timeline in months.
    pub timeline_months: i32,
}

/// Default conversion from months to weeks.
pub const WEEKS_PER_MONTH: u32 = 4;

impl CareerGoal {
    pub fn new(title: impl Into<String>, timeline_months: i32) -> Self {
        Self {
            title: title.into(),
            target_skills: BTreeMap::new(),
            timeline_months,
        }
    }

    pub fn with_target(mut self, skill: impl Into<String>, level: ProficiencyLevel) -> Self {
        self.target_skills.insert(skill.into(), level);
        self
    }

    #[must_use]
    pub fn requires(&self, skill: &str) -> bool {
        self.target_skills.contains_key(skill)
    }

    /// Time budget in weeks. May be negative for a malformed goal; the
    /// optimizer rejects that.
    #[must_use]
    pub fn budget_weeks(&self, weeks_per_month: u32) -> i64 {
        i64::from(self.timeline_months) * i64::from(weeks_per_month)
    }
}
