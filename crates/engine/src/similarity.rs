//! Pairwise course similarity.
//!
//! Similarity between two courses is a weighted sum of four sub-similarities,
//! each symmetric and clamped to [0.0, 1.0]:
//!
//! | component   | formula                                         | weight |
//! |-------------|-------------------------------------------------|--------|
//! | skills      | `|A ∩ B| / max(|A|, |B|)` (0 if either empty)   | 0.4    |
//! | difficulty  | `1 - |tier(a) - tier(b)| / tiers`               | 0.3    |
//! | rating      | `1 - |rating(a) - rating(b)| / 5`               | 0.2    |
//! | completion  | `1 - |rate(a) - rate(b)|`                       | 0.1    |
//!
//! The matrix is built once per catalog. The full cross product is O(n²)
//! pairs; catalogs beyond a few thousand courses need a skill index instead.

use crate::types::{Course, ProficiencyLevel, Score};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SKILL_WEIGHT: f64 = 0.4;
const DIFFICULTY_WEIGHT: f64 = 0.3;
const RATING_WEIGHT: f64 = 0.2;
const COMPLETION_WEIGHT: f64 = 0.1;

/// Upper bound of the rating scale.
const MAX_RATING: f64 = 5.0;

/// Square, symmetric course similarity matrix with a unit diagonal.
///
/// Indexed by each course's position in the catalog at build time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMatrix")]
pub struct SimilarityMatrix {
    ids: Vec<String>,
    /// Row-major `n * n` entries.
    values: Vec<f64>,
}

/// Wire form, checked for squareness before it becomes a matrix.
#[derive(Deserialize)]
struct RawMatrix {
    ids: Vec<String>,
    values: Vec<f64>,
}

impl TryFrom<RawMatrix> for SimilarityMatrix {
    type Error = String;

    fn try_from(raw: RawMatrix) -> Result<Self, Self::Error> {
        let n = raw.ids.len();
        let expected = n.checked_mul(n).ok_or("similarity matrix too large")?;
        if raw.values.len() != expected {
            return Err(format!(
                "similarity matrix has {} values for {n} courses, expected {expected}",
                raw.values.len()
            ));
        }
        Ok(Self {
            ids: raw.ids,
            values: raw.values,
        })
    }
}

impl SimilarityMatrix {
    /// Number of courses (rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Course ids in row order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Entry at `(i, j)`, or `None` when out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        let n = self.len();
        if i >= n || j >= n {
            return None;
        }
        self.values.get(i * n + j).copied()
    }

    /// Row `i`, or `None` when out of range.
    #[must_use]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        let n = self.len();
        if i >= n {
            return None;
        }
        self.values.get(i * n..(i + 1) * n)
    }

    /// Position of the first course with `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.iter().position(|candidate| candidate == id)
    }

    /// Similarity between two courses by id.
    #[must_use]
    pub fn between(&self, a: &str, b: &str) -> Option<f64> {
        self.get(self.index_of(a)?, self.index_of(b)?)
    }

    /// The `k` courses most similar to `id`, highest first.
    ///
    /// Ties keep catalog order. Returns an empty list for unknown ids.
    #[must_use]
    pub fn most_similar(&self, id: &str, k: usize) -> Vec<(&str, f64)> {
        let Some(i) = self.index_of(id) else {
            return Vec::new();
        };
        let Some(row) = self.row(i) else {
            return Vec::new();
        };

        let mut neighbours: Vec<(&str, f64)> = row
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(j, score)| (self.ids[j].as_str(), *score))
            .collect();
        neighbours.sort_by(|a, b| b.1.total_cmp(&a.1));
        neighbours.truncate(k);
        neighbours
    }
}

/// Skill overlap between two skill sets.
fn skill_overlap(a: &HashSet<&str>, b: &HashSet<&str>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    a.intersection(b).count() as f64 / a.len().max(b.len()) as f64
}

fn pair_similarity(
    a: &Course,
    skills_a: &HashSet<&str>,
    b: &Course,
    skills_b: &HashSet<&str>,
) -> f64 {
    let skill = Score::new(skill_overlap(skills_a, skills_b));
    let difficulty = Score::new(
        1.0 - f64::from(a.difficulty.distance(b.difficulty)) / ProficiencyLevel::COUNT as f64,
    );
    let rating = Score::new(1.0 - (a.rating - b.rating).abs() / MAX_RATING);
    let completion = Score::new(1.0 - (a.completion_rate - b.completion_rate).abs());

    Score::new(
        SKILL_WEIGHT * skill.value()
            + DIFFICULTY_WEIGHT * difficulty.value()
            + RATING_WEIGHT * rating.value()
            + COMPLETION_WEIGHT * completion.value(),
    )
    .value()
}

/// Similarity between two distinct courses.
#[must_use]
pub fn course_similarity(a: &Course, b: &Course) -> f64 {
    let skills_a: HashSet<&str> = a.skills.iter().map(String::as_str).collect();
    let skills_b: HashSet<&str> = b.skills.iter().map(String::as_str).collect();
    pair_similarity(a, &skills_a, b, &skills_b)
}

/// Build the similarity matrix for a catalog.
///
/// Only the upper triangle is computed (rows in parallel) and mirrored into
/// the lower one; the diagonal is forced to 1.0.
#[must_use]
pub fn build_course_similarity(catalog: &[Course]) -> SimilarityMatrix {
    let n = catalog.len();
    let skill_sets: Vec<HashSet<&str>> = catalog
        .iter()
        .map(|course| course.skills.iter().map(String::as_str).collect())
        .collect();

    let upper: Vec<Vec<f64>> = (0..n)
        .into_par_iter()
        .map(|i| {
            ((i + 1)..n)
                .map(|j| {
                    pair_similarity(&catalog[i], &skill_sets[i], &catalog[j], &skill_sets[j])
                })
                .collect()
        })
        .collect();

    let mut values = vec![0.0; n * n];
    for (i, row) in upper.into_iter().enumerate() {
        values[i * n + i] = 1.0;
        for (offset, score) in row.into_iter().enumerate() {
            let j = i + 1 + offset;
            values[i * n + j] = score;
            values[j * n + i] = score;
        }
    }

    tracing::debug!(
        target: "skillpath::similarity",
        courses = n,
        pairs = n * n.saturating_sub(1) / 2,
        "built course similarity matrix"
    );

    SimilarityMatrix {
        ids: catalog.iter().map(|course| course.id.clone()).collect(),
        values,
    }
}
