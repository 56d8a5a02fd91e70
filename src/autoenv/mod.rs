//! Autoenv bindings.
//!
//! autoenv sources `.env` when the shell enters a directory and `.env.leave`
//! when it leaves. [`AutoenvPatcher`] keeps one `source <venv>` line in the
//! first file and a `deactivate` line in the second, asking before it
//! overwrites a binding that points somewhere else.

pub mod activation;
pub mod deactivation;

pub use activation::{activation_line, find_binding, plan_activation, ActivationPlan};
pub use deactivation::plan_deactivation;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::AutoenvConfig;
use crate::error::Result;
use crate::ui::{Prompt, UserInterface};

/// Prompt key for the replacement confirmation.
pub const REPLACE_PROMPT_KEY: &str = "replace_entry";

/// The answer that confirms a replacement. Anything else declines.
const CONFIRM: &str = "Y";

/// Locations of the two autoenv files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoenvPaths {
    pub activation: PathBuf,
    pub deactivation: PathBuf,
}

impl Default for AutoenvPaths {
    fn default() -> Self {
        Self::from_config(&AutoenvConfig::default())
    }
}

impl AutoenvPaths {
    /// Paths as configured, relative to the working directory.
    pub fn from_config(config: &AutoenvConfig) -> Self {
        Self {
            activation: config.activation_file.clone(),
            deactivation: config.deactivation_file.clone(),
        }
    }

    /// Paths as configured, resolved against `dir`.
    pub fn in_dir(dir: &Path, config: &AutoenvConfig) -> Self {
        Self {
            activation: dir.join(&config.activation_file),
            deactivation: dir.join(&config.deactivation_file),
        }
    }
}

/// Result of patching the activation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationOutcome {
    /// No binding existed; one was added.
    Appended,
    /// The binding already matched.
    Unchanged,
    /// A different binding was replaced after confirmation.
    Replaced { previous: String },
    /// A different binding was kept because the user declined.
    Declined { existing: String },
}

/// Result of patching the deactivation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeactivationOutcome {
    Appended,
    Unchanged,
}

/// Outcome of patching both files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoenvReport {
    pub activation: ActivationOutcome,
    pub deactivation: DeactivationOutcome,
}

/// Edits the autoenv files in place.
pub struct AutoenvPatcher<'a> {
    paths: AutoenvPaths,
    ui: &'a mut dyn UserInterface,
}

impl<'a> AutoenvPatcher<'a> {
    pub fn new(paths: AutoenvPaths, ui: &'a mut dyn UserInterface) -> Self {
        Self { paths, ui }
    }

    /// Patch the activation file, then the deactivation file.
    pub fn patch(&mut self, name: &str, location: &Path) -> Result<AutoenvReport> {
        let activation = self.patch_activation(name, location)?;
        let deactivation = self.patch_deactivation()?;
        Ok(AutoenvReport {
            activation,
            deactivation,
        })
    }

    /// Make the activation file source `<location>/<name>`.
    pub fn patch_activation(&mut self, name: &str, location: &Path) -> Result<ActivationOutcome> {
        let path = self.paths.activation.clone();
        let content = read_or_empty(&path)?;
        let line = activation_line(name, location);

        match plan_activation(&content, &line) {
            ActivationPlan::Append(updated) => {
                fs::write(&path, updated)?;
                tracing::debug!("Added autoenv entry to {}", path.display());
                self.ui
                    .success(&format!("Added \"{}\" to {}", line, path.display()));
                Ok(ActivationOutcome::Appended)
            }
            ActivationPlan::Unchanged => {
                self.ui
                    .message("Found matching autoenv entry. No change applied.");
                Ok(ActivationOutcome::Unchanged)
            }
            ActivationPlan::Conflict { existing, replaced } => {
                self.ui
                    .warning(&format!("Found existing autoenv entry:\n\n\t{}\n", existing));

                let prompt = Prompt::new(REPLACE_PROMPT_KEY, "Replace existing entry? (n/Y) ")
                    .with_default("n");
                let answer = self.ui.prompt(&prompt)?;

                if answer != CONFIRM {
                    tracing::debug!("Kept existing autoenv entry in {}", path.display());
                    return Ok(ActivationOutcome::Declined { existing });
                }

                fs::write(&path, replaced)?;
                tracing::debug!("Replaced autoenv entry in {}", path.display());
                self.ui
                    .success(&format!("Replaced \"{}\" with \"{}\"", existing, line));
                Ok(ActivationOutcome::Replaced { previous: existing })
            }
        }
    }

    /// Make sure the deactivation file deactivates the environment.
    pub fn patch_deactivation(&mut self) -> Result<DeactivationOutcome> {
        let path = self.paths.deactivation.clone();
        let content = read_or_empty(&path)?;

        match plan_deactivation(&content) {
            Some(updated) => {
                fs::write(&path, updated)?;
                tracing::info!("Added deactivate to {}", path.display());
                Ok(DeactivationOutcome::Appended)
            }
            None => {
                tracing::debug!("{} already deactivates", path.display());
                Ok(DeactivationOutcome::Unchanged)
            }
        }
    }
}

fn read_or_empty(path: &Path) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(String::new()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn paths(temp: &TempDir) -> AutoenvPaths {
        AutoenvPaths::in_dir(temp.path(), &AutoenvConfig::default())
    }

    fn location() -> PathBuf {
        PathBuf::from("/home/u/venv")
    }

    #[test]
    fn default_paths_are_relative() {
        let paths = AutoenvPaths::default();
        assert_eq!(paths.activation, PathBuf::from(".env"));
        assert_eq!(paths.deactivation, PathBuf::from(".env.leave"));
    }

    #[test]
    fn missing_files_are_created() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let mut patcher = AutoenvPatcher::new(paths(&temp), &mut ui);

        let report = patcher.patch("venv", &location()).unwrap();

        assert_eq!(report.activation, ActivationOutcome::Appended);
        assert_eq!(report.deactivation, DeactivationOutcome::Appended);
        assert_eq!(
            fs::read_to_string(temp.path().join(".env")).unwrap(),
            "# Activate venv upon entering the directory\nsource /home/u/venv/venv"
        );
        assert_eq!(
            fs::read_to_string(temp.path().join(".env.leave")).unwrap(),
            "# deactivate venv when leaving\ndeactivate"
        );
    }

    #[test]
    fn matching_binding_is_left_alone_without_prompting() {
        let temp = TempDir::new().unwrap();
        let env = temp.path().join(".env");
        fs::write(&env, "source /home/u/venv/venv\n").unwrap();
        let mut ui = MockUI::new();

        let outcome = AutoenvPatcher::new(paths(&temp), &mut ui)
            .patch_activation("venv", &location())
            .unwrap();

        assert_eq!(outcome, ActivationOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&env).unwrap(), "source /home/u/venv/venv\n");
        assert!(ui.prompts_shown().is_empty());
        assert!(ui.has_message("No change applied"));
    }

    #[test]
    fn conflicting_binding_kept_unless_confirmed() {
        let temp = TempDir::new().unwrap();
        let env = temp.path().join(".env");
        fs::write(&env, "source /old/env\n").unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response(REPLACE_PROMPT_KEY, "y");

        let outcome = AutoenvPatcher::new(paths(&temp), &mut ui)
            .patch_activation("venv", &location())
            .unwrap();

        assert_eq!(
            outcome,
            ActivationOutcome::Declined {
                existing: "source /old/env".into()
            }
        );
        assert_eq!(fs::read_to_string(&env).unwrap(), "source /old/env\n");
        assert!(ui.has_warning("source /old/env"));
        assert_eq!(ui.prompts_shown(), [REPLACE_PROMPT_KEY]);
    }

    #[test]
    fn empty_answer_declines() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".env"), "activate other").unwrap();
        let mut ui = MockUI::new();

        let outcome = AutoenvPatcher::new(paths(&temp), &mut ui)
            .patch_activation("venv", &location())
            .unwrap();

        assert!(matches!(outcome, ActivationOutcome::Declined { .. }));
    }

    #[test]
    fn confirmed_replacement_is_written() {
        let temp = TempDir::new().unwrap();
        let env = temp.path().join(".env");
        fs::write(&env, "export A=1\nsource /old/env\n").unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response(REPLACE_PROMPT_KEY, "Y");

        let outcome = AutoenvPatcher::new(paths(&temp), &mut ui)
            .patch_activation("venv", &location())
            .unwrap();

        assert_eq!(
            outcome,
            ActivationOutcome::Replaced {
                previous: "source /old/env".into()
            }
        );
        assert_eq!(
            fs::read_to_string(&env).unwrap(),
            "export A=1\nsource /home/u/venv/venv"
        );
    }

    #[test]
    fn patching_twice_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let mut patcher = AutoenvPatcher::new(paths(&temp), &mut ui);

        patcher.patch("venv", &location()).unwrap();
        let env = fs::read_to_string(temp.path().join(".env")).unwrap();
        let leave = fs::read_to_string(temp.path().join(".env.leave")).unwrap();

        let report = patcher.patch("venv", &location()).unwrap();

        assert_eq!(report.activation, ActivationOutcome::Unchanged);
        assert_eq!(report.deactivation, DeactivationOutcome::Unchanged);
        assert_eq!(fs::read_to_string(temp.path().join(".env")).unwrap(), env);
        assert_eq!(
            fs::read_to_string(temp.path().join(".env.leave")).unwrap(),
            leave
        );
    }

    #[test]
    fn existing_deactivate_is_not_duplicated() {
        let temp = TempDir::new().unwrap();
        let leave = temp.path().join(".env.leave");
        fs::write(&leave, "echo bye\ndeactivate\n").unwrap();
        let mut ui = MockUI::new();

        let outcome = AutoenvPatcher::new(paths(&temp), &mut ui)
            .patch_deactivation()
            .unwrap();

        assert_eq!(outcome, DeactivationOutcome::Unchanged);
        assert_eq!(fs::read_to_string(&leave).unwrap(), "echo bye\ndeactivate\n");
    }

    #[test]
    fn custom_file_names_from_config() {
        let temp = TempDir::new().unwrap();
        let config = AutoenvConfig {
            activation_file: ".autoenv".into(),
            deactivation_file: ".autoenv.leave".into(),
        };
        let mut ui = MockUI::new();

        AutoenvPatcher::new(AutoenvPaths::in_dir(temp.path(), &config), &mut ui)
            .patch("venv", &location())
            .unwrap();

        assert!(temp.path().join(".autoenv").exists());
        assert!(temp.path().join(".autoenv.leave").exists());
        assert!(!temp.path().join(".env").exists());
    }
}
