//! External command execution and platform helpers.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{execute, CommandResult, CommandRunner, CommandSpec, SystemRunner};
pub use mock::MockRunner;
pub use platform::{expand_tilde, is_ci};
