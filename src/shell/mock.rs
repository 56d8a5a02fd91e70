//! Scripted command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! answers with pre-configured results keyed by the rendered command line
//! and records every invocation for later assertion.
//!
//! # Example
//!
//! ```
//! use mkvenv::shell::{CommandRunner, CommandSpec, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.respond_success("pyenv root", "/home/u/.pyenv\n");
//!
//! let result = runner.run(&CommandSpec::new("pyenv").arg("root")).unwrap();
//! assert_eq!(result.stdout, "/home/u/.pyenv\n");
//! assert_eq!(runner.call_count("pyenv root"), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{MkvenvError, Result};

use super::{CommandResult, CommandRunner, CommandSpec};

#[derive(Debug, Clone)]
enum Scripted {
    Finished(CommandResult),
    Missing,
}

/// Command runner that replays scripted results.
///
/// Commands with no scripted result behave like a missing executable.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: RefCell<HashMap<String, Scripted>>,
    calls: RefCell<Vec<String>>,
}

impl MockRunner {
    /// Create a runner with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful exit with the given stdout.
    pub fn respond_success(&self, command: &str, stdout: &str) {
        self.respond(
            command,
            CommandResult::success(stdout.to_string(), String::new(), Duration::ZERO),
        );
    }

    /// Script a nonzero exit with the given stderr.
    pub fn respond_failure(&self, command: &str, code: i32, stderr: &str) {
        self.respond(
            command,
            CommandResult::failure(Some(code), String::new(), stderr.to_string(), Duration::ZERO),
        );
    }

    /// Script an arbitrary result.
    pub fn respond(&self, command: &str, result: CommandResult) {
        self.responses
            .borrow_mut()
            .insert(command.to_string(), Scripted::Finished(result));
    }

    /// Script a spawn failure (executable not found).
    pub fn respond_missing(&self, command: &str) {
        self.responses
            .borrow_mut()
            .insert(command.to_string(), Scripted::Missing);
    }

    /// All command lines run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// How many times a command line was run.
    pub fn call_count(&self, command: &str) -> usize {
        self.calls.borrow().iter().filter(|c| *c == command).count()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let command = spec.to_string();
        self.calls.borrow_mut().push(command.clone());

        match self.responses.borrow().get(&command) {
            Some(Scripted::Finished(result)) => Ok(result.clone()),
            Some(Scripted::Missing) | None => Err(MkvenvError::SpawnFailed {
                command,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
            }),
        }
    }
}
