//! Configuration and dataset loading for skillpath.
//!
//! This crate provides utilities for:
//! - Reading environment variables for configuration.
//! - Loading `~/.skillpath/config.toml` and merging it with CLI overrides.
//! - Reading catalog, demand, learner and goal JSON files.

pub mod config;
pub mod dataset;
pub mod env;

pub use config::{
    load_config, resolve_settings, Config, DataConfig, Overrides, PlannerConfig, Settings,
};
pub use dataset::{load_goal, load_learner, Dataset, CATALOG_FILE, DEMAND_FILE};
pub use env::{config_path, data_dir_from_env, env_order, env_strategy, home_dir};
