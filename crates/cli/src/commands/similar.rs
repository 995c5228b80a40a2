//! CLI handler for the `similar` command.

use super::{emit, load_dataset};
use crate::cli::OutputFormat;
use anyhow::{Context, Result};
use serde::Serialize;
use skillpath_engine::{CatalogHandle, CatalogSnapshot};
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct SimilarReport {
    course: String,
    similar: Vec<SimilarCourse>,
}

#[derive(Debug, Serialize)]
struct SimilarCourse {
    id: String,
    title: String,
    similarity: f64,
}

impl SimilarReport {
    fn new(snapshot: &CatalogSnapshot, course_id: &str, top: usize) -> Result<Self> {
        snapshot
            .course(course_id)
            .with_context(|| format!("course not found: {course_id}"))?;

        let similar = snapshot
            .similarity()
            .most_similar(course_id, top)
            .into_iter()
            .map(|(id, similarity)| SimilarCourse {
                id: id.to_string(),
                title: snapshot
                    .course(id)
                    .map(|course| course.title.clone())
                    .unwrap_or_default(),
                similarity,
            })
            .collect();
        Ok(Self {
            course: course_id.to_string(),
            similar,
        })
    }
}

fn render_text(report: &SimilarReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Courses similar to {}", report.course);
    if report.similar.is_empty() {
        let _ = writeln!(out, "  No other courses in the catalog.");
    }
    for course in &report.similar {
        let _ = writeln!(
            out,
            "  {:<8} {:<32} {:.3}",
            course.id, course.title, course.similarity
        );
    }
    out
}

/// Handle the `similar` command.
pub(crate) fn handle_similar_command(
    course_id: &str,
    top: usize,
    data_dir: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let dataset = load_dataset(data_dir)?;
    let handle = CatalogHandle::new(dataset.courses, dataset.demand)?;
    let report = SimilarReport::new(&handle.snapshot(), course_id, top)?;
    emit(&report, format, render_text)
}
