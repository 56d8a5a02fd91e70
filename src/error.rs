//! Error types for mkvenv operations.
//!
//! This module defines [`MkvenvError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Failures talking to the version manager surface as [`ResolutionError`]
//! - Failures creating the environment surface as [`MkvenvError::Provision`]
//! - Use `anyhow::Error` (via `MkvenvError::Other`) for unexpected errors
//!
//! A pre-existing environment and a declined autoenv replacement are
//! outcomes, not errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for mkvenv operations.
#[derive(Debug, Error)]
pub enum MkvenvError {
    /// Interpreter lookup through the version manager failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The environment tool exited with a nonzero status.
    #[error("Error creating venv ({command}, exit code {code:?}): {stderr}")]
    Provision {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// An external program could not be started at all.
    #[error("Failed to run {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The request cannot be acted on as given.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Reasons an interpreter could not be resolved.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// The version manager ran but exited nonzero.
    #[error("Error querying version manager ({command}, exit code {code:?}): {stderr}")]
    QueryFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The version manager executable could not be started.
    #[error("Version manager unavailable ({command}): {message}")]
    ToolNotFound { command: String, message: String },

    /// No installed version satisfies the specifier.
    #[error("No matching python version: {specifier} ({})", candidates.join(", "))]
    NoMatch {
        specifier: String,
        candidates: Vec<String>,
    },

    /// The resolved version has no interpreter binary.
    #[error("Python executable not found: {path}")]
    InterpreterMissing { path: PathBuf },
}

/// Result type alias for mkvenv operations.
pub type Result<T> = std::result::Result<T, MkvenvError>;
