//! mkvenv - Create Python virtual environments from installed versions.
//!
//! mkvenv asks a version manager (pyenv by default) which interpreters are
//! installed, picks the newest one matching a version prefix, creates a venv
//! with it and optionally wires the venv into autoenv's `.env` and
//! `.env.leave` files.
//!
//! # Modules
//!
//! - [`autoenv`] - Activation and deactivation bindings
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and layering
//! - [`environment`] - Venv requests and provisioning
//! - [`error`] - Error types and result aliases
//! - [`init_files`] - `__init__.py` scaffolding
//! - [`runner`] - The end-to-end creation workflow
//! - [`shell`] - External command execution
//! - [`ui`] - Prompts, spinners, and terminal output
//! - [`versions`] - Installed version listing and matching
//!
//! # Example
//!
//! ```
//! use mkvenv::versions::resolve;
//!
//! let installed = vec!["3.9.18".to_string(), "3.10.4".to_string(), "3.10.12".to_string()];
//! assert_eq!(resolve("3.10", &installed).unwrap(), "3.10.12");
//! ```

pub mod autoenv;
pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod init_files;
pub mod runner;
pub mod shell;
pub mod ui;
pub mod versions;

pub use error::{MkvenvError, Result};
