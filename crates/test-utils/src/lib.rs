//! Shared test utilities for skillpath crates.
//!
//! This crate provides env-var guards and temp dataset fixtures used across
//! multiple crates in the skillpath workspace. Dataset files are written as
//! plain JSON so the fixtures do not depend on the engine's types.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

/// Serialize tests that mutate process-global state (env vars, cwd, etc).
///
/// Acquire this guard at the start of any test that modifies environment
/// variables to prevent race conditions between parallel tests.
pub fn env_guard() -> MutexGuard<'static, ()> {
    static TEST_SERIAL: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));
    TEST_SERIAL.lock().unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for environment variables - restores original value on drop.
pub struct EnvVarGuard {
    key: &'static str,
    previous: Option<String>,
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        if let Some(v) = &self.previous {
            std::env::set_var(self.key, v);
        } else {
            std::env::remove_var(self.key);
        }
    }
}

/// Set an environment variable and return a guard that restores the original on drop.
///
/// # Example
/// ```
/// let _guard = skillpath_test_utils::set_env_var("MY_VAR", Some("value"));
/// // MY_VAR is set to "value"
/// // When _guard drops, MY_VAR is restored to its original value
/// ```
pub fn set_env_var(key: &'static str, value: Option<&str>) -> EnvVarGuard {
    let previous = std::env::var(key).ok();
    if let Some(val) = value {
        std::env::set_var(key, val);
    } else {
        std::env::remove_var(key);
    }
    EnvVarGuard { key, previous }
}

/// Catalog JSON for the two-course sample dataset.
pub fn sample_catalog() -> Value {
    json!([
        {
            "id": "PY101",
            "title": "Python Fundamentals",
            "skills": ["Python", "Programming Basics"],
            "difficulty": "beginner",
            "duration_weeks": 6,
            "rating": 4.5,
            "completion_rate": 0.85,
            "prerequisites": []
        },
        {
            "id": "DA201",
            "title": "Data Analysis with Python",
            "skills": ["Python", "Data Analysis", "Pandas"],
            "difficulty": "intermediate",
            "duration_weeks": 8,
            "rating": 4.7,
            "completion_rate": 0.78,
            "prerequisites": ["Python"]
        }
    ])
}

/// Demand JSON matching [`sample_catalog`].
pub fn sample_demand() -> Value {
    json!({
        "Python": {
            "current_demand": 0.85,
            "growth_rate": 0.15,
            "industry_distribution": {"Technology": 0.6, "Finance": 0.3, "Healthcare": 0.1}
        },
        "Data Analysis": {
            "current_demand": 0.9,
            "growth_rate": 0.2,
            "industry_distribution": {"Technology": 0.4, "Finance": 0.4, "Healthcare": 0.2}
        }
    })
}

/// Learner JSON with the given `(skill, level)` pairs.
pub fn learner_json(id: &str, skills: &[(&str, &str)], completed: &[&str]) -> Value {
    let skills: serde_json::Map<String, Value> = skills
        .iter()
        .map(|(name, level)| (name.to_string(), json!({ "level": level })))
        .collect();
    json!({ "id": id, "skills": skills, "completed_courses": completed })
}

/// Goal JSON with the given `(skill, level)` targets.
pub fn goal_json(title: &str, targets: &[(&str, &str)], timeline_months: i32) -> Value {
    let targets: serde_json::Map<String, Value> = targets
        .iter()
        .map(|(name, level)| (name.to_string(), json!(level)))
        .collect();
    json!({ "title": title, "target_skills": targets, "timeline_months": timeline_months })
}

/// Standard test fixture with a temp HOME and a dataset directory.
///
/// The tempdir is automatically cleaned up when this struct is dropped.
pub struct TestFixture {
    pub tempdir: tempfile::TempDir,
    /// Directory for `catalog.json` and `demand.json`
    pub data_dir: PathBuf,
    /// Path to ~/.skillpath in the temp environment
    pub config_dir: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture.
    ///
    /// Creates:
    /// - `$HOME/.skillpath/`
    /// - `$HOME/data/`
    ///
    /// Does NOT set HOME env var - use `home_guard()` for that.
    pub fn new() -> std::io::Result<Self> {
        let tempdir = tempfile::tempdir()?;
        let data_dir = tempdir.path().join("data");
        let config_dir = tempdir.path().join(".skillpath");

        std::fs::create_dir_all(&data_dir)?;
        std::fs::create_dir_all(&config_dir)?;

        Ok(Self {
            tempdir,
            data_dir,
            config_dir,
        })
    }

    /// Get the path that should be set as HOME.
    pub fn home_path(&self) -> &Path {
        self.tempdir.path()
    }

    /// Create an RAII guard that sets HOME to this fixture's temp directory.
    pub fn home_guard(&self) -> EnvVarGuard {
        set_env_var("HOME", Some(self.home_path().to_string_lossy().as_ref()))
    }

    /// Write `value` as pretty JSON to `path` relative to the temp root.
    pub fn write_json(&self, path: &str, value: &Value) -> std::io::Result<PathBuf> {
        let target = self.tempdir.path().join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
        std::fs::write(&target, body)?;
        Ok(target)
    }

    /// Write `catalog.json` and `demand.json` into the data directory.
    pub fn write_dataset(&self, catalog: &Value, demand: &Value) -> std::io::Result<&Path> {
        self.write_json("data/catalog.json", catalog)?;
        self.write_json("data/demand.json", demand)?;
        Ok(&self.data_dir)
    }

    /// Write the sample catalog and demand records into the data directory.
    pub fn write_sample_dataset(&self) -> std::io::Result<&Path> {
        self.write_dataset(&sample_catalog(), &sample_demand())
    }

    /// Write `~/.skillpath/config.toml`.
    pub fn write_config(&self, content: &str) -> std::io::Result<PathBuf> {
        let path = self.config_dir.join("config.toml");
        std::fs::write(&path, content)?;
        Ok(path)
    }
}
