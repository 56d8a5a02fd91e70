//! Create command implementation.
//!
//! The default `mkvenv [VERSION] [NAME]` command creates a venv.

use std::path::{Path, PathBuf};

use crate::cli::args::CreateArgs;
use crate::config::{load_config, MkvenvConfig};
use crate::environment::EnvironmentRequest;
use crate::error::Result;
use crate::runner::Workflow;
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The create command implementation.
pub struct CreateCommand {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    args: CreateArgs,
}

impl CreateCommand {
    /// Create a new create command.
    pub fn new(project_root: &Path, config_path: Option<PathBuf>, args: CreateArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_path,
            args,
        }
    }

    /// Build the request, filling gaps from configuration.
    pub fn build_request(&self, config: &MkvenvConfig) -> EnvironmentRequest {
        let name = self
            .args
            .name
            .clone()
            .unwrap_or_else(|| config.environment.default_name.clone());
        let location = self
            .args
            .location
            .clone()
            .unwrap_or_else(|| config.environment.default_location.clone());

        let mut request = EnvironmentRequest::new(name, location).with_autoenv(self.args.autoenv);
        if let Some(version) = &self.args.python_version {
            request = request.with_version(version.clone());
        }
        if let Some(exec) = &self.args.exec {
            request = request.with_interpreter(exec.clone());
        }
        request
    }

    /// Run the command with an explicit process runner.
    pub fn execute_with(
        &self,
        runner: &dyn CommandRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        let request = self.build_request(&config);

        let report = Workflow::new(runner, &config)
            .with_autoenv_dir(&self.project_root)
            .run(&request, ui)?;
        tracing::debug!(
            "Finished {} in {:?}",
            report.provision.target().display(),
            report.duration
        );

        Ok(CommandResult::success())
    }
}

impl Command for CreateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.execute_with(&SystemRunner::new(), ui)
    }
}
