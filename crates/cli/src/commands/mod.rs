//! CLI command handlers for the skillpath application.

mod gaps;
mod plan;
mod similar;
mod vectors;

pub(crate) use gaps::handle_gaps_command;
pub(crate) use plan::handle_plan_command;
pub(crate) use similar::handle_similar_command;
pub(crate) use vectors::handle_vectors_command;

use crate::cli::OutputFormat;
use anyhow::Result;
use serde::Serialize;
use skillpath_state::{resolve_settings, Dataset, Overrides};
use std::path::PathBuf;

/// Print `report` as pretty JSON or through `render_text`.
fn emit<T: Serialize>(
    report: &T,
    format: OutputFormat,
    render_text: fn(&T) -> String,
) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => print!("{}", render_text(report)),
    }
    Ok(())
}

/// Dataset chosen by the `--data-dir` flag, environment or config file.
fn load_dataset(data_dir: Option<PathBuf>) -> Result<Dataset> {
    let settings = resolve_settings(Overrides {
        data_dir,
        ..Default::default()
    })?;
    Dataset::load_or_sample(settings.data_dir.as_deref())
}
