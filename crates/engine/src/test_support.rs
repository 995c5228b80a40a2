//! Test builders for the engine crate.

use crate::types::{Course, ProficiencyLevel};
use std::collections::HashMap;

/// Build a course with neutral rating and completion rate.
pub(crate) fn course(
    id: &str,
    skills: &[&str],
    difficulty: ProficiencyLevel,
    duration_weeks: u32,
) -> Course {
    Course {
        id: id.to_string(),
        title: format!("{id} course"),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        difficulty,
        duration_weeks,
        rating: 4.0,
        completion_rate: 0.8,
        prerequisites: Vec::new(),
    }
}

/// Utility map from `(id, utility)` pairs.
pub(crate) fn utilities(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs
        .iter()
        .map(|(id, utility)| (id.to_string(), *utility))
        .collect()
}
