use anyhow::{Context, Result};
use skillpath_engine::{OptimizerStrategy, PathOrder};
use std::path::PathBuf;

/// Returns the dataset directory from the `SKILLPATH_DATA_DIR` environment variable.
pub fn data_dir_from_env() -> Option<PathBuf> {
    std::env::var("SKILLPATH_DATA_DIR")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Returns the user's home directory.
pub fn home_dir() -> Result<PathBuf> {
    #[cfg(unix)]
    if let Ok(home) = std::env::var("HOME") {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("home directory not found"))
}

/// Returns the path to the config file.
///
/// `SKILLPATH_CONFIG` overrides the default `~/.skillpath/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(custom) = std::env::var("SKILLPATH_CONFIG") {
        return Some(PathBuf::from(custom));
    }
    home_dir()
        .ok()
        .map(|h| h.join(".skillpath").join("config.toml"))
}

/// Optimizer strategy from `SKILLPATH_STRATEGY`, if set.
pub fn env_strategy() -> Result<Option<OptimizerStrategy>> {
    parse_env("SKILLPATH_STRATEGY")
}

/// Path order from `SKILLPATH_ORDER`, if set.
pub fn env_order() -> Result<Option<PathOrder>> {
    parse_env("SKILLPATH_ORDER")
}

fn parse_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr<Err = String>,
{
    let Ok(raw) = std::env::var(key) else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    raw.parse::<T>()
        .map(Some)
        .map_err(anyhow::Error::msg)
        .with_context(|| format!("invalid {key}"))
}
