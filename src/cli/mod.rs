//! Command-line interface for mkvenv.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{parse_lenient, Cli, Commands, CompletionsArgs, CreateArgs, InitFilesArgs, Language};
pub use commands::{Command, CommandDispatcher, CommandResult};
