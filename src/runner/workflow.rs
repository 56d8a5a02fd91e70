//! Environment creation workflow.
//!
//! Ties the pieces together for one invocation: pick an interpreter, create
//! the environment, then write the autoenv bindings if asked.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::autoenv::{AutoenvPatcher, AutoenvPaths, AutoenvReport};
use crate::config::MkvenvConfig;
use crate::environment::{
    normalize_target, EnvironmentProvisioner, EnvironmentRequest, ProvisionOutcome,
};
use crate::error::{MkvenvError, Result};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;
use crate::versions::VersionCatalog;

/// Result of running the workflow.
#[derive(Debug)]
pub struct WorkflowReport {
    /// Interpreter the environment was created with.
    pub interpreter: PathBuf,
    /// Resolved version, when the version manager was consulted.
    pub version: Option<String>,
    /// Whether the environment was created or already there.
    pub provision: ProvisionOutcome,
    /// Autoenv changes, when requested.
    pub autoenv: Option<AutoenvReport>,
    /// Total duration.
    pub duration: Duration,
}

/// Runs one environment request from start to finish.
pub struct Workflow<'a> {
    runner: &'a dyn CommandRunner,
    config: &'a MkvenvConfig,
    autoenv_dir: Option<PathBuf>,
}

impl<'a> Workflow<'a> {
    pub fn new(runner: &'a dyn CommandRunner, config: &'a MkvenvConfig) -> Self {
        Self {
            runner,
            config,
            autoenv_dir: None,
        }
    }

    /// Write autoenv files into `dir` instead of the working directory.
    pub fn with_autoenv_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.autoenv_dir = Some(dir.into());
        self
    }

    pub fn run(
        &self,
        request: &EnvironmentRequest,
        ui: &mut dyn UserInterface,
    ) -> Result<WorkflowReport> {
        let start = Instant::now();
        tracing::debug!("Running {:?}", request);

        let (interpreter, version) = self.interpreter_for(request)?;
        let location = normalize_target(request.location())?;

        let provisioner =
            EnvironmentProvisioner::new(self.runner, &self.config.environment.module);
        let provision = self.provision(
            &provisioner,
            request,
            &location,
            &interpreter,
            version.as_deref(),
            ui,
        )?;

        let autoenv = if request.autoenv {
            let paths = match &self.autoenv_dir {
                Some(dir) => AutoenvPaths::in_dir(dir, &self.config.autoenv),
                None => AutoenvPaths::from_config(&self.config.autoenv),
            };
            let report = AutoenvPatcher::new(paths, ui).patch(&request.name, &location)?;
            Some(report)
        } else {
            None
        };

        Ok(WorkflowReport {
            interpreter,
            version,
            provision,
            autoenv,
            duration: start.elapsed(),
        })
    }

    /// An explicit interpreter wins; otherwise ask the version manager.
    fn interpreter_for(&self, request: &EnvironmentRequest) -> Result<(PathBuf, Option<String>)> {
        if let Some(interpreter) = &request.interpreter {
            if request.version.is_some() {
                tracing::debug!(
                    "Ignoring version specifier in favour of {}",
                    interpreter.display()
                );
            }
            return Ok((interpreter.clone(), None));
        }

        let specifier = request.version.as_deref().unwrap_or_default();
        if specifier.is_empty() {
            return Err(MkvenvError::InvalidRequest {
                message: "Version required to lookup python exec".to_string(),
            });
        }

        let catalog = VersionCatalog::new(self.runner, self.config.version_manager.clone());
        let (interpreter, version) = catalog.find_interpreter(specifier)?;
        Ok((interpreter, Some(version)))
    }

    fn provision(
        &self,
        provisioner: &EnvironmentProvisioner<'_>,
        request: &EnvironmentRequest,
        location: &Path,
        interpreter: &Path,
        version: Option<&str>,
        ui: &mut dyn UserInterface,
    ) -> Result<ProvisionOutcome> {
        let mut spinner = ui.start_spinner(&format!("Creating venv \"{}\"", request.name));

        let outcome = match provisioner.provision(&request.name, location, interpreter) {
            Ok(outcome) => outcome,
            Err(e) => {
                spinner.finish_error("Error creating venv");
                return Err(e);
            }
        };

        match &outcome {
            ProvisionOutcome::Created(_) => {
                let created = match version {
                    Some(v) => format!(
                        "Created venv \"{}\" (v{}) at \"{}\"",
                        request.name,
                        v,
                        location.display()
                    ),
                    None => format!(
                        "Created venv \"{}\" at \"{}\"",
                        request.name,
                        location.display()
                    ),
                };
                tracing::debug!("{}", created);
                spinner.finish_success(&created);
            }
            ProvisionOutcome::AlreadyExists(_) => {
                spinner.finish_skipped("Skipped");
                ui.warning(&format!(
                    "Found existing venv \"{}\" at \"{}\"",
                    request.name,
                    location.display()
                ));
            }
        }

        Ok(outcome)
    }
}
