//! Environment directory creation.
//!
//! Runs `<interpreter> -m <module> <target>`. An existing target is
//! reported as [`ProvisionOutcome::AlreadyExists`] rather than an error, so
//! a repeated invocation can still go on to write autoenv bindings.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{MkvenvError, Result};
use crate::shell::{expand_tilde, CommandRunner, CommandSpec};

/// What provisioning did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The environment was created at this path.
    Created(PathBuf),
    /// Something already exists at this path; nothing was run.
    AlreadyExists(PathBuf),
}

impl ProvisionOutcome {
    /// The normalized environment path.
    pub fn target(&self) -> &Path {
        match self {
            Self::Created(path) | Self::AlreadyExists(path) => path,
        }
    }
}

/// Creates environments with an interpreter's environment module.
pub struct EnvironmentProvisioner<'a> {
    runner: &'a dyn CommandRunner,
    module: String,
}

impl<'a> EnvironmentProvisioner<'a> {
    /// Create a provisioner running `-m <module>`.
    pub fn new(runner: &'a dyn CommandRunner, module: impl Into<String>) -> Self {
        Self {
            runner,
            module: module.into(),
        }
    }

    /// Create the environment `name` inside `location` using `interpreter`.
    pub fn provision(
        &self,
        name: &str,
        location: &Path,
        interpreter: &Path,
    ) -> Result<ProvisionOutcome> {
        let target = normalize_target(&location.join(name))?;

        if fs::symlink_metadata(&target).is_ok() {
            tracing::debug!("{} already exists", target.display());
            return Ok(ProvisionOutcome::AlreadyExists(target));
        }

        let spec = CommandSpec::new(interpreter)
            .arg("-m")
            .arg(&self.module)
            .arg(&target);

        let result = self.runner.run(&spec).map_err(|e| match e {
            MkvenvError::SpawnFailed { command, source } => MkvenvError::Provision {
                command,
                code: None,
                stderr: source.to_string(),
            },
            other => other,
        })?;

        if !result.success {
            tracing::debug!("{}", result.stderr.trim_end());
            return Err(MkvenvError::Provision {
                command: spec.to_string(),
                code: result.exit_code,
                stderr: result.stderr,
            });
        }

        Ok(ProvisionOutcome::Created(target))
    }
}

/// Make `path` absolute with `~` expanded and symlinks resolved.
///
/// Components are applied one at a time: each existing prefix is
/// canonicalized, `.` is dropped and `..` pops a component, so a target
/// that does not exist yet still resolves through existing symlinks.
pub fn normalize_target(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        std::env::current_dir()?.join(expanded)
    };

    let mut resolved = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => {
                resolved.push(other.as_os_str());
                if let Ok(real) = resolved.canonicalize() {
                    resolved = real;
                }
            }
        }
    }
    Ok(resolved)
}
