//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::ffi::OsString;
use std::path::PathBuf;

/// mkvenv - Create Python virtual environments from installed versions.
///
/// With no subcommand, creates a venv named NAME in the location directory
/// using the newest installed Python matching VERSION.
#[derive(Debug, Parser)]
#[command(name = "mkvenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (skips ~/.mkvenv/config.yml and .mkvenv/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Never prompt; use MKVENV_PROMPT_* variables or defaults
    #[arg(long, global = true)]
    pub non_interactive: bool,

    #[command(flatten)]
    pub create: CreateArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create directories with __init__.py at every level
    InitFiles(InitFilesArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for creating an environment (the default command).
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CreateArgs {
    /// Python version to look up, e.g. 3.10 (newest matching install wins)
    #[arg(value_name = "VERSION")]
    pub python_version: Option<String>,

    /// Venv name [default: venv]
    pub name: Option<String>,

    /// Where to create the venv [default: ~/venv]
    #[arg(short = 'C', long, value_name = "DIR")]
    pub location: Option<PathBuf>,

    /// Explicit path to python executable (skips the version manager)
    #[arg(long = "exec", value_name = "PATH")]
    pub exec: Option<PathBuf>,

    /// Add activate/deactivate bindings to the autoenv files
    #[arg(long)]
    pub autoenv: bool,
}

/// Package layout to scaffold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Language {
    #[default]
    Python,
}

/// Arguments for the `init-files` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InitFilesArgs {
    /// Directories to scaffold, relative to the current directory
    pub targets: Vec<PathBuf>,

    /// Do not create missing target directories
    #[arg(long = "no-make-dirs", action = ArgAction::SetFalse)]
    pub make_dirs: bool,

    /// Language format
    #[arg(long, value_enum, default_value_t = Language::Python)]
    pub language: Language,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse the command line, skipping arguments clap does not recognize.
///
/// Each unknown token is dropped and parsing restarts, so arguments after
/// it still apply. Any other error (including help and version requests)
/// is returned for the caller to report.
pub fn parse_lenient<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    loop {
        let err = match Cli::try_parse_from(&args) {
            Ok(cli) => return Ok(cli),
            Err(err) => err,
        };
        if err.kind() != ErrorKind::UnknownArgument {
            return Err(err);
        }
        let token = match err.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(token)) => token.clone(),
            _ => return Err(err),
        };
        let with_value = format!("{token}=");
        let position = args.iter().skip(1).position(|arg| {
            arg.to_str()
                .is_some_and(|arg| arg == token.as_str() || arg.starts_with(&with_value))
        });
        match position {
            Some(index) => {
                tracing::debug!("Ignoring unknown argument: {}", token);
                args.remove(index + 1);
            }
            None => return Err(err),
        }
    }
}
