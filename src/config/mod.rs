//! Configuration loading for mkvenv.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layering in [`merger`]
//!
//! # Example
//!
//! ```
//! use mkvenv::config::load_config;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("mkvenv.yml");
//! fs::write(&path, "environment:\n  module: virtualenv\n").unwrap();
//!
//! let config = load_config(temp.path(), Some(path.as_path())).unwrap();
//! assert_eq!(config.environment.module, "virtualenv");
//! assert_eq!(config.version_manager.program, "pyenv");
//! ```

pub mod loader;
pub mod merger;
pub mod schema;

pub use loader::{load_config, load_config_value, load_merged_config, ConfigPaths};
pub use merger::{deep_merge, merge_configs};
pub use schema::{AutoenvConfig, EnvironmentConfig, MkvenvConfig, VersionManagerConfig};
