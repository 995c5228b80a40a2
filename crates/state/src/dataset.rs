//! JSON dataset files: catalog, demand records, learner profiles and goals.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use skillpath_engine::{
    CareerGoal, Course, CourseRecord, DemandRecord, LearnerProfile, ProficiencyLevel, Skill,
};
use std::collections::BTreeMap;
use std::path::Path;

/// File name of the course catalog inside a dataset directory.
pub const CATALOG_FILE: &str = "catalog.json";
/// File name of the skill demand records inside a dataset directory.
pub const DEMAND_FILE: &str = "demand.json";

/// Catalog and demand records loaded together.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub courses: Vec<Course>,
    pub demand: BTreeMap<String, DemandRecord>,
}

impl Dataset {
    /// Load `catalog.json` and `demand.json` from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let records: Vec<CourseRecord> = read_json(&dir.join(CATALOG_FILE))?;
        let courses = records
            .into_iter()
            .map(Course::try_from)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("invalid course in {}", dir.join(CATALOG_FILE).display()))?;
        let demand = read_json(&dir.join(DEMAND_FILE))?;

        tracing::debug!(
            target: "skillpath::dataset",
            dir = %dir.display(),
            courses = courses.len(),
            "Loaded dataset"
        );

        Ok(Self { courses, demand })
    }

    /// Load from `dir`, or fall back to the built-in sample when `None`.
    pub fn load_or_sample(dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => Self::load(dir),
            None => {
                tracing::debug!(target: "skillpath::dataset", "Using built-in sample dataset");
                Ok(Self::sample())
            }
        }
    }

    /// Two-course Python / data analysis sample.
    pub fn sample() -> Self {
        let python = Course {
            id: "PY101".into(),
            title: "Python Fundamentals".into(),
            skills: vec!["Python".into(), "Programming Basics".into()],
            difficulty: ProficiencyLevel::Beginner,
            duration_weeks: 6,
            rating: 4.5,
            completion_rate: 0.85,
            prerequisites: Vec::new(),
        };
        let analysis = Course {
            id: "DA201".into(),
            title: "Data Analysis with Python".into(),
            skills: vec!["Python".into(), "Data Analysis".into(), "Pandas".into()],
            difficulty: ProficiencyLevel::Intermediate,
            duration_weeks: 8,
            rating: 4.7,
            completion_rate: 0.78,
            prerequisites: vec!["Python".into()],
        };

        let demand = BTreeMap::from([
            (
                "Python".to_string(),
                demand_record(
                    0.85,
                    0.15,
                    &[("Technology", 0.6), ("Finance", 0.3), ("Healthcare", 0.1)],
                ),
            ),
            (
                "Data Analysis".to_string(),
                demand_record(
                    0.9,
                    0.2,
                    &[("Technology", 0.4), ("Finance", 0.4), ("Healthcare", 0.2)],
                ),
            ),
        ]);

        Self {
            courses: vec![python, analysis],
            demand,
        }
    }
}

fn demand_record(current: f64, growth: f64, industries: &[(&str, f64)]) -> DemandRecord {
    DemandRecord {
        current_demand: Some(current),
        growth_rate: Some(growth),
        industry_distribution: industries
            .iter()
            .map(|(name, share)| (name.to_string(), *share))
            .collect(),
    }
}

/// Learner file layout: skills keyed by name.
#[derive(Debug, Deserialize)]
struct LearnerFile {
    id: String,
    #[serde(default)]
    skills: BTreeMap<String, SkillEntry>,
    #[serde(default)]
    completed_courses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SkillEntry {
    level: ProficiencyLevel,
    #[serde(default)]
    last_assessed: Option<DateTime<Utc>>,
}

impl From<LearnerFile> for LearnerProfile {
    fn from(file: LearnerFile) -> Self {
        let skills = file
            .skills
            .into_iter()
            .map(|(name, entry)| Skill {
                last_assessed: entry.last_assessed,
                ..Skill::new(name, entry.level)
            })
            .collect();
        LearnerProfile {
            id: file.id,
            skills,
            completed_courses: file.completed_courses,
        }
    }
}

/// Load a learner profile.
pub fn load_learner(path: &Path) -> Result<LearnerProfile> {
    let file: LearnerFile = read_json(path)?;
    Ok(file.into())
}

/// Load a career goal.
pub fn load_goal(path: &Path) -> Result<CareerGoal> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
