//! Skill feature vectors derived from demand records.
//!
//! Each vector is laid out as `[demand, growth_rate, share(industry_0), ...]`
//! where industries follow the lexicographically sorted union of every
//! industry seen across the input. Skills that never mention an industry get
//! a zero share for it, so all vectors have the same length and compare
//! dimension by dimension.

use crate::error::{PathError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Demand data for one skill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemandRecord {
    /// Current market demand (0-1).
    pub current_demand: Option<f64>,
    /// Growth rate (>= 0, usually below 1).
    pub growth_rate: Option<f64>,
    /// Industry name to share. Shares are descriptive and not normalized.
    #[serde(default)]
    pub industry_distribution: BTreeMap<String, f64>,
}

/// Fixed-order numeric vector for a skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillFeatureVector(Vec<f64>);

impl SkillFeatureVector {
    #[must_use]
    pub fn demand(&self) -> f64 {
        self.0.first().copied().unwrap_or_default()
    }

    #[must_use]
    pub fn growth_rate(&self) -> f64 {
        self.0.get(1).copied().unwrap_or_default()
    }

    /// Industry shares in the order of [`SkillVectors::industries`].
    #[must_use]
    pub fn industry_shares(&self) -> &[f64] {
        self.0.get(2..).unwrap_or_default()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Cosine similarity with another vector.
    ///
    /// Returns 0.0 when the lengths differ or either norm is zero.
    #[must_use]
    pub fn cosine_similarity(&self, other: &Self) -> f64 {
        if self.len() != other.len() {
            return 0.0;
        }
        let dot: f64 = self.0.iter().zip(&other.0).map(|(a, b)| a * b).sum();
        let norm_a = self.0.iter().map(|v| v * v).sum::<f64>().sqrt();
        let norm_b = other.0.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        dot / (norm_a * norm_b)
    }
}

/// Feature vectors for every skill plus the shared industry axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillVectors {
    /// Sorted industry universe backing the share dimensions.
    pub industries: Vec<String>,
    /// Vector per skill name.
    pub vectors: BTreeMap<String, SkillFeatureVector>,
}

impl SkillVectors {
    #[must_use]
    pub fn get(&self, skill: &str) -> Option<&SkillFeatureVector> {
        self.vectors.get(skill)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Dimension of every vector.
    #[must_use]
    pub fn dimension(&self) -> usize {
        2 + self.industries.len()
    }
}

/// Build one feature vector per skill.
///
/// Fails with [`PathError::MissingField`] when a skill lacks its demand or
/// growth rate.
pub fn build_skill_vectors(demand: &BTreeMap<String, DemandRecord>) -> Result<SkillVectors> {
    let industries: Vec<String> = demand
        .values()
        .flat_map(|record| record.industry_distribution.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut vectors = BTreeMap::new();
    for (skill, record) in demand {
        let current_demand = record
            .current_demand
            .ok_or_else(|| PathError::missing(skill, "current_demand"))?;
        let growth_rate = record
            .growth_rate
            .ok_or_else(|| PathError::missing(skill, "growth_rate"))?;

        let mut features = Vec::with_capacity(2 + industries.len());
        features.push(current_demand);
        features.push(growth_rate);
        features.extend(industries.iter().map(|industry| {
            record
                .industry_distribution
                .get(industry)
                .copied()
                .unwrap_or(0.0)
        }));

        vectors.insert(skill.clone(), SkillFeatureVector(features));
    }

    tracing::debug!(
        target: "skillpath::features",
        skills = vectors.len(),
        industries = industries.len(),
        "built skill feature vectors"
    );

    Ok(SkillVectors {
        industries,
        vectors,
    })
}
