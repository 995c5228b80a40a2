//! Versioned, immutable catalog snapshots.
//!
//! A [`CatalogSnapshot`] bundles the course catalog with everything derived
//! from it (skill feature vectors and the course similarity matrix). Snapshots
//! are never mutated. [`CatalogHandle::reload`] builds a replacement outside
//! the lock and swaps the `Arc`, so readers holding an older snapshot keep a
//! consistent view while new readers see the new one.

use crate::error::Result;
use crate::features::{build_skill_vectors, DemandRecord, SkillVectors};
use crate::similarity::{build_course_similarity, SimilarityMatrix};
use crate::types::Course;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Catalog plus derived vectors and similarities, tagged with a version.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    version: u64,
    courses: Vec<Course>,
    demand: BTreeMap<String, DemandRecord>,
    vectors: SkillVectors,
    similarity: SimilarityMatrix,
}

impl CatalogSnapshot {
    /// Validate the catalog and derive vectors and similarities.
    ///
    /// Courses with a duplicate id after the first are dropped so the
    /// similarity matrix has one row per id.
    pub fn build(
        version: u64,
        courses: Vec<Course>,
        demand: BTreeMap<String, DemandRecord>,
    ) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(courses.len());
        for course in courses {
            course.validate()?;
            if seen.insert(course.id.clone()) {
                unique.push(course);
            } else {
                tracing::debug!(
                    target: "skillpath::snapshot",
                    course = %course.id,
                    "dropping duplicate course id"
                );
            }
        }

        let vectors = build_skill_vectors(&demand)?;
        let similarity = build_course_similarity(&unique);

        tracing::debug!(
            target: "skillpath::snapshot",
            version,
            courses = unique.len(),
            skills = vectors.len(),
            "built catalog snapshot"
        );

        Ok(Self {
            version,
            courses: unique,
            demand,
            vectors,
            similarity,
        })
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    #[must_use]
    pub fn demand(&self) -> &BTreeMap<String, DemandRecord> {
        &self.demand
    }

    #[must_use]
    pub fn vectors(&self) -> &SkillVectors {
        &self.vectors
    }

    #[must_use]
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}

/// Shared handle to the current catalog snapshot.
///
/// Cheap to share across threads; `snapshot` only clones an `Arc`.
#[derive(Debug)]
pub struct CatalogHandle {
    current: RwLock<Arc<CatalogSnapshot>>,
    next_version: AtomicU64,
}

impl CatalogHandle {
    /// Build the first snapshot (version 1).
    pub fn new(courses: Vec<Course>, demand: BTreeMap<String, DemandRecord>) -> Result<Self> {
        let snapshot = CatalogSnapshot::build(1, courses, demand)?;
        Ok(Self {
            current: RwLock::new(Arc::new(snapshot)),
            next_version: AtomicU64::new(2),
        })
    }

    /// The snapshot current at the time of the call.
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.current.read())
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.current.read().version
    }

    /// Rebuild from new inputs and swap the result in.
    ///
    /// On error the current snapshot is left untouched.
    pub fn reload(
        &self,
        courses: Vec<Course>,
        demand: BTreeMap<String, DemandRecord>,
    ) -> Result<Arc<CatalogSnapshot>> {
        let version = self.next_version.fetch_add(1, Ordering::Relaxed);
        let snapshot = Arc::new(CatalogSnapshot::build(version, courses, demand)?);

        let mut current = self.current.write();
        // A slower concurrent reload must not replace a newer snapshot.
        if current.version < version {
            *current = Arc::clone(&snapshot);
        }
        drop(current);

        tracing::info!(
            target: "skillpath::snapshot",
            version,
            courses = snapshot.courses.len(),
            "reloaded catalog snapshot"
        );
        Ok(snapshot)
    }
}
