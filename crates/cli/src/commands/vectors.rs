//! CLI handler for the `vectors` command.

use super::{emit, load_dataset};
use crate::cli::OutputFormat;
use anyhow::Result;
use skillpath_engine::{build_skill_vectors, SkillVectors};
use std::fmt::Write;
use std::path::PathBuf;

fn render_text(vectors: &SkillVectors) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<24} {:>7} {:>7} {}",
        "skill",
        "demand",
        "growth",
        vectors.industries.join(" ")
    );
    for (skill, vector) in &vectors.vectors {
        let shares: Vec<String> = vector
            .industry_shares()
            .iter()
            .map(|share| format!("{share:.2}"))
            .collect();
        let _ = writeln!(
            out,
            "{:<24} {:>7.2} {:>7.2} {}",
            skill,
            vector.demand(),
            vector.growth_rate(),
            shares.join(" ")
        );
    }
    out
}

/// Handle the `vectors` command.
pub(crate) fn handle_vectors_command(
    data_dir: Option<PathBuf>,
    format: OutputFormat,
) -> Result<()> {
    let dataset = load_dataset(data_dir)?;
    let vectors = build_skill_vectors(&dataset.demand)?;
    emit(&vectors, format, render_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillpath_state::Dataset;

    #[test]
    fn test_text_has_one_row_per_skill() {
        let vectors = build_skill_vectors(&Dataset::sample().demand).unwrap();
        let text = render_text(&vectors);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Finance Healthcare Technology"));
        assert!(lines[2].starts_with("Python"));
        assert!(lines[2].ends_with("0.30 0.10 0.60"));
    }
}
