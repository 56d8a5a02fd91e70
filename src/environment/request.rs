//! Environment requests.

use std::path::{Path, PathBuf};

/// What the caller asked for in one invocation.
///
/// Either `interpreter` or `version` must be set for the request to be
/// provisionable; an explicit interpreter takes precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRequest {
    /// Environment directory name.
    pub name: String,

    /// Directory the environment is created in.
    pub location: PathBuf,

    /// Explicit interpreter path, bypassing the version manager.
    pub interpreter: Option<PathBuf>,

    /// Version specifier such as `3.10`.
    pub version: Option<String>,

    /// Whether to write autoenv bindings in the working directory.
    pub autoenv: bool,
}

impl EnvironmentRequest {
    /// Create a request with no interpreter source and autoenv disabled.
    pub fn new(name: impl Into<String>, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            interpreter: None,
            version: None,
            autoenv: false,
        }
    }

    /// Set the version specifier.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set an explicit interpreter path.
    pub fn with_interpreter(mut self, interpreter: impl Into<PathBuf>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    /// Enable or disable autoenv bindings.
    pub fn with_autoenv(mut self, autoenv: bool) -> Self {
        self.autoenv = autoenv;
        self
    }

    /// The environment directory, before normalization.
    pub fn target(&self) -> PathBuf {
        self.location.join(&self.name)
    }

    /// The location as given.
    pub fn location(&self) -> &Path {
        &self.location
    }
}
