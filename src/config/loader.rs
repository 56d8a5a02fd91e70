//! Configuration file discovery and loading.
//!
//! Configuration is optional. Files are merged in this order, later
//! overriding earlier:
//! 1. User global config (`~/.mkvenv/config.yml`)
//! 2. Project config (`.mkvenv/config.yml` in the working directory)
//!
//! An explicit `--config` file is loaded on its own, without merging.

use crate::config::merger::merge_configs;
use crate::config::schema::MkvenvConfig;
use crate::error::{MkvenvError, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding mkvenv config files.
const CONFIG_DIR: &str = ".mkvenv";

/// Config file name inside [`CONFIG_DIR`].
const CONFIG_FILE: &str = "config.yml";

/// Paths to configuration files in merge order.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// User's global config: ~/.mkvenv/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .mkvenv/config.yml
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given working directory.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: dirs::home_dir().and_then(|home| existing(&home)),
            project: existing(project_root),
        }
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.project.iter()).collect()
    }
}

fn existing(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_DIR).join(CONFIG_FILE);
    path.is_file().then_some(path)
}

/// Load a config file as a raw YAML value.
///
/// An empty file is treated as an empty mapping.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)?;

    let value: Value = serde_yaml::from_str(&content).map_err(|e| MkvenvError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if value.is_null() {
        Ok(Value::Mapping(Default::default()))
    } else {
        Ok(value)
    }
}

/// Parse a merged value into the typed config.
fn parse_value(value: Value, source_path: &Path) -> Result<MkvenvConfig> {
    serde_yaml::from_value(value).map_err(|e| MkvenvError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge all discovered config files.
///
/// Returns the defaults when no file exists.
pub fn load_merged_config(project_root: &Path) -> Result<MkvenvConfig> {
    let paths = ConfigPaths::discover(project_root);
    let existing = paths.all_existing();

    let Some(last) = existing.last() else {
        return Ok(MkvenvConfig::default());
    };
    tracing::debug!("Loading config from {:?}", existing);

    let configs = existing
        .iter()
        .map(|path| load_config_value(path))
        .collect::<Result<Vec<_>>>()?;

    parse_value(merge_configs(&configs), last)
}

/// Load config with optional path override.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<MkvenvConfig> {
    match config_override {
        Some(path) => parse_value(load_config_value(path)?, path),
        None => load_merged_config(project_root),
    }
}
