//! Init-files command implementation.
//!
//! `mkvenv init-files` turns directories into Python packages.

use std::path::{Path, PathBuf};

use crate::cli::args::InitFilesArgs;
use crate::error::Result;
use crate::init_files::make_init_files;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The init-files command implementation.
pub struct InitFilesCommand {
    project_root: PathBuf,
    args: InitFilesArgs,
}

impl InitFilesCommand {
    /// Create a new init-files command.
    pub fn new(project_root: &Path, args: InitFilesArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for InitFilesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        tracing::debug!(
            "Scaffolding {:?} as {:?}",
            self.args.targets,
            self.args.language
        );

        let touched = make_init_files(
            &self.project_root,
            &self.args.targets,
            self.args.make_dirs,
        )?;

        for path in &touched {
            ui.message(&path.display().to_string());
        }
        Ok(CommandResult::success())
    }
}
