//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`]; creating a venv is the default when no
//! subcommand is given.

pub mod completions;
pub mod create;
pub mod dispatcher;
pub mod init_files;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
