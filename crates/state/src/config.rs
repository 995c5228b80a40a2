//! Configuration file support for skillpath.
//!
//! Loads settings from `~/.skillpath/config.toml` with the following precedence:
//! CLI arguments > Environment variables > Config file > built-in defaults
//!
//! ## Configuration File Format
//!
//! ```toml
//! # ~/.skillpath/config.toml
//!
//! [planner]
//! # Months-to-weeks conversion for goal timelines
//! weeks_per_month = 4
//!
//! # "exact" (set-keyed) or "compact" (duration-keyed)
//! strategy = "exact"
//!
//! # "insertion" or "prerequisites"
//! order = "insertion"
//!
//! [data]
//! # Directory holding catalog.json and demand.json
//! dir = "/path/to/dataset"
//! ```

use crate::env::{config_path, data_dir_from_env, env_order, env_strategy};
use anyhow::{Context, Result};
use serde::Deserialize;
use skillpath_engine::{OptimizerStrategy, PathOrder, PlannerOptions};
use std::path::PathBuf;

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub data: DataConfig,
}

/// Planner defaults.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlannerConfig {
    pub weeks_per_month: Option<u32>,
    pub strategy: Option<OptimizerStrategy>,
    pub order: Option<PathOrder>,
}

/// Dataset location.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    pub dir: Option<PathBuf>,
}

/// Loads the configuration file if it exists.
///
/// Returns `Ok(None)` if the file doesn't exist.
/// Returns `Ok(Some(config))` if the file exists and parses successfully.
/// Returns `Err` if the file exists but fails to parse.
pub fn load_config() -> Result<Option<Config>> {
    let Some(path) = config_path() else {
        return Ok(None);
    };

    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;

    tracing::debug!(
        target: "skillpath::config",
        path = %path.display(),
        "Loaded configuration file"
    );

    Ok(Some(config))
}

/// Values given on the command line. `None` means "not given".
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub strategy: Option<OptimizerStrategy>,
    pub order: Option<PathOrder>,
}

/// Effective settings after merging every layer.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Settings {
    pub planner: PlannerOptions,
    /// Dataset directory; `None` selects the built-in sample dataset.
    pub data_dir: Option<PathBuf>,
}

/// Merge CLI overrides, environment variables and the config file.
pub fn resolve_settings(overrides: Overrides) -> Result<Settings> {
    let config = load_config()?.unwrap_or_default();
    merge(overrides, env_layer()?, config)
}

fn env_layer() -> Result<Overrides> {
    Ok(Overrides {
        data_dir: data_dir_from_env(),
        strategy: env_strategy()?,
        order: env_order()?,
    })
}

fn merge(cli: Overrides, env: Overrides, config: Config) -> Result<Settings> {
    let defaults = PlannerOptions::default();
    let weeks_per_month = config
        .planner
        .weeks_per_month
        .unwrap_or(defaults.weeks_per_month);
    if weeks_per_month == 0 {
        anyhow::bail!("planner.weeks_per_month must be positive");
    }

    Ok(Settings {
        planner: PlannerOptions {
            weeks_per_month,
            strategy: cli
                .strategy
                .or(env.strategy)
                .or(config.planner.strategy)
                .unwrap_or(defaults.strategy),
            order: cli
                .order
                .or(env.order)
                .or(config.planner.order)
                .unwrap_or(defaults.order),
        },
        data_dir: cli.data_dir.or(env.data_dir).or(config.data.dir),
    })
}
