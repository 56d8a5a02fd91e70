//! Configuration schema definitions for mkvenv.
//!
//! This module contains the struct definitions that map to the YAML
//! configuration file format. Every field has a default, so an empty or
//! missing file yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for `config.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MkvenvConfig {
    /// How to query installed interpreters.
    pub version_manager: VersionManagerConfig,

    /// How environments are created.
    pub environment: EnvironmentConfig,

    /// Autoenv file locations.
    pub autoenv: AutoenvConfig,
}

/// Version manager invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionManagerConfig {
    /// Version manager executable.
    pub program: String,

    /// Arguments that print the manager's root directory.
    pub root_args: Vec<String>,

    /// Arguments that list installed versions.
    pub versions_args: Vec<String>,
}

impl Default for VersionManagerConfig {
    fn default() -> Self {
        Self {
            program: "pyenv".to_string(),
            root_args: vec!["root".to_string()],
            versions_args: vec!["versions".to_string()],
        }
    }
}

/// Environment creation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Module run as `<python> -m <module> <target>`.
    pub module: String,

    /// Where environments go when `--location` is not given.
    pub default_location: PathBuf,

    /// Environment name when none is given.
    pub default_name: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            module: "venv".to_string(),
            default_location: PathBuf::from("~/venv"),
            default_name: "venv".to_string(),
        }
    }
}

/// Autoenv file paths, relative to the working directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoenvConfig {
    /// File sourced when entering the directory.
    pub activation_file: PathBuf,

    /// File sourced when leaving the directory.
    pub deactivation_file: PathBuf,
}

impl Default for AutoenvConfig {
    fn default() -> Self {
        Self {
            activation_file: PathBuf::from(".env"),
            deactivation_file: PathBuf::from(".env.leave"),
        }
    }
}
