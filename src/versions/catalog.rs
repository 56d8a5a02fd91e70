//! Installed interpreter catalog backed by a version manager.
//!
//! The catalog asks the version manager (pyenv by default) for its root
//! directory and its installed versions. Each answer is fetched at most
//! once per catalog; later calls return the same data without running the
//! tool again.

use regex::Regex;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::config::VersionManagerConfig;
use crate::error::{MkvenvError, ResolutionError, Result};
use crate::shell::{CommandResult, CommandRunner, CommandSpec};

use super::resolver::resolve;

/// Lines of the version listing that name an installed version.
///
/// An optional active-version marker (`*`) and whitespace, then `<int>.<int>`.
static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\s*]*\d+\.\d+").expect("VERSION_LINE must compile")
});

/// Parse the version manager's listing into bare version strings.
///
/// Headers, blank lines and entries such as `system` are dropped. Trailing
/// annotations like `(set by ...)` are removed. Order is preserved.
///
/// # Example
///
/// ```
/// use mkvenv::versions::parse_versions;
///
/// let output = "  system\n  3.9.18\n* 3.10.4 (set by /home/u/.pyenv/version)\n";
/// assert_eq!(parse_versions(output), vec!["3.9.18", "3.10.4"]);
/// ```
pub fn parse_versions(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| VERSION_LINE.is_match(line))
        .filter_map(|line| {
            line.trim_start_matches(|c: char| c == '*' || c.is_whitespace())
                .split_whitespace()
                .next()
                .map(str::to_string)
        })
        .collect()
}

/// Extract the root path from the root query's output.
///
/// The path is the last non-empty line; earlier lines may be warnings.
fn parse_root(output: &str) -> Option<PathBuf> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .last()
        .map(PathBuf::from)
}

/// Memoized view of a version manager's installed interpreters.
pub struct VersionCatalog<'a> {
    runner: &'a dyn CommandRunner,
    manager: VersionManagerConfig,
    root: OnceCell<PathBuf>,
    versions: OnceCell<Vec<String>>,
}

impl<'a> VersionCatalog<'a> {
    /// Create a catalog that queries `manager` through `runner`.
    pub fn new(runner: &'a dyn CommandRunner, manager: VersionManagerConfig) -> Self {
        Self {
            runner,
            manager,
            root: OnceCell::new(),
            versions: OnceCell::new(),
        }
    }

    /// The version manager's root directory.
    pub fn root(&self) -> Result<&Path> {
        if let Some(root) = self.root.get() {
            return Ok(root);
        }

        let spec = CommandSpec::new(&self.manager.program).args(&self.manager.root_args);
        let result = self.query(&spec)?;
        let root = parse_root(&result.stdout).ok_or_else(|| ResolutionError::QueryFailed {
            command: spec.to_string(),
            code: result.exit_code,
            stderr: "no root directory in output".to_string(),
        })?;
        tracing::debug!("Version manager root: {}", root.display());

        Ok(self.root.get_or_init(|| root))
    }

    /// Installed versions, in the order the version manager lists them.
    pub fn installed_versions(&self) -> Result<&[String]> {
        if let Some(versions) = self.versions.get() {
            return Ok(versions);
        }

        let spec = CommandSpec::new(&self.manager.program).args(&self.manager.versions_args);
        let result = self.query(&spec)?;
        let versions = parse_versions(&result.stdout);
        tracing::debug!("Installed versions: {:?}", versions);

        Ok(self.versions.get_or_init(|| versions))
    }

    /// Resolve `specifier` to an installed version string.
    pub fn resolve(&self, specifier: &str) -> Result<String> {
        if specifier.is_empty() {
            return Err(MkvenvError::InvalidRequest {
                message: "Version required to lookup python exec".to_string(),
            });
        }
        resolve(specifier, self.installed_versions()?)
    }

    /// Find the interpreter executable for `specifier`.
    ///
    /// Returns `<root>/versions/<version>/bin/python` together with the
    /// resolved version.
    pub fn find_interpreter(&self, specifier: &str) -> Result<(PathBuf, String)> {
        let version = self.resolve(specifier)?;
        let root = self.root()?;
        tracing::info!("Using {} from {}", version, self.manager.program);

        let interpreter = root.join("versions").join(&version).join("bin").join("python");
        if !interpreter.exists() {
            return Err(ResolutionError::InterpreterMissing { path: interpreter }.into());
        }
        Ok((interpreter, version))
    }

    /// Run a query, translating failures into [`ResolutionError`].
    fn query(&self, spec: &CommandSpec) -> Result<CommandResult> {
        let result = self.runner.run(spec).map_err(|e| match e {
            MkvenvError::SpawnFailed { command, source } => {
                MkvenvError::from(ResolutionError::ToolNotFound {
                    command,
                    message: source.to_string(),
                })
            }
            other => other,
        })?;

        if !result.success {
            tracing::error!("{}", result.stderr.trim_end());
            return Err(ResolutionError::QueryFailed {
                command: spec.to_string(),
                code: result.exit_code,
                stderr: result.stderr,
            }
            .into());
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::MockRunner;
    use std::fs;
    use tempfile::TempDir;

    const PYENV_VERSIONS: &str = "  system\n  3.8.10\n  3.9.18\n* 3.10.4 (set by /home/u/.pyenv/version)\n  3.10.0\n";

    fn pyenv() -> VersionManagerConfig {
        VersionManagerConfig::default()
    }

    #[test]
    fn parse_versions_strips_marker_and_annotation() {
        assert_eq!(
            parse_versions(PYENV_VERSIONS),
            vec!["3.8.10", "3.9.18", "3.10.4", "3.10.0"]
        );
    }

    #[test]
    fn parse_versions_drops_non_matching_lines() {
        let output = "Available versions:\n\n  miniconda3-latest\n  3.12.1\n  3.12-dev\n";
        assert_eq!(parse_versions(output), vec!["3.12.1", "3.12-dev"]);
    }

    #[test]
    fn parse_versions_requires_dotted_pair() {
        assert!(parse_versions("  3\n  3-dev\n").is_empty());
    }

    #[test]
    fn parse_root_uses_last_non_empty_line() {
        let output = "pyenv: warning: shims out of date\n/home/u/.pyenv\n\n";
        assert_eq!(parse_root(output), Some(PathBuf::from("/home/u/.pyenv")));
        assert_eq!(parse_root("\n  \n"), None);
    }

    #[test]
    fn root_is_memoized() {
        let runner = MockRunner::new();
        runner.respond_success("pyenv root", "/home/u/.pyenv\n");
        let catalog = VersionCatalog::new(&runner, pyenv());

        let first = catalog.root().unwrap().to_path_buf();
        let second = catalog.root().unwrap().to_path_buf();

        assert_eq!(first, PathBuf::from("/home/u/.pyenv"));
        assert_eq!(first, second);
        assert_eq!(runner.call_count("pyenv root"), 1);
    }

    #[test]
    fn versions_are_memoized() {
        let runner = MockRunner::new();
        runner.respond_success("pyenv versions", PYENV_VERSIONS);
        let catalog = VersionCatalog::new(&runner, pyenv());

        let first = catalog.installed_versions().unwrap().to_vec();
        let second = catalog.installed_versions().unwrap().to_vec();

        assert_eq!(first, second);
        assert_eq!(runner.call_count("pyenv versions"), 1);
    }

    #[test]
    fn nonzero_exit_is_query_failed() {
        let runner = MockRunner::new();
        runner.respond_failure("pyenv versions", 1, "pyenv: broken");
        let catalog = VersionCatalog::new(&runner, pyenv());

        let err = catalog.installed_versions().unwrap_err();
        match err {
            MkvenvError::Resolution(ResolutionError::QueryFailed {
                command,
                code,
                stderr,
            }) => {
                assert_eq!(command, "pyenv versions");
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "pyenv: broken");
            }
            other => panic!("Expected QueryFailed, got {other:?}"),
        }
    }

    #[test]
    fn missing_tool_is_resolution_error() {
        let runner = MockRunner::new();
        runner.respond_missing("pyenv root");
        let catalog = VersionCatalog::new(&runner, pyenv());

        let err = catalog.root().unwrap_err();
        assert!(matches!(
            err,
            MkvenvError::Resolution(ResolutionError::ToolNotFound { .. })
        ));
    }

    #[test]
    fn failed_query_is_not_cached() {
        let runner = MockRunner::new();
        runner.respond_failure("pyenv root", 1, "");
        let catalog = VersionCatalog::new(&runner, pyenv());
        assert!(catalog.root().is_err());

        runner.respond_success("pyenv root", "/opt/pyenv\n");
        assert_eq!(catalog.root().unwrap(), Path::new("/opt/pyenv"));
        assert_eq!(runner.call_count("pyenv root"), 2);
    }

    #[test]
    fn empty_specifier_fails_before_querying() {
        let runner = MockRunner::new();
        let catalog = VersionCatalog::new(&runner, pyenv());

        let err = catalog.find_interpreter("").unwrap_err();

        assert!(matches!(err, MkvenvError::InvalidRequest { .. }));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn find_interpreter_returns_existing_binary() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join("versions/3.10.4/bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(bin.join("python"), "").unwrap();

        let runner = MockRunner::new();
        runner.respond_success("pyenv root", &format!("{}\n", temp.path().display()));
        runner.respond_success("pyenv versions", PYENV_VERSIONS);
        let catalog = VersionCatalog::new(&runner, pyenv());

        let (interpreter, version) = catalog.find_interpreter("3.10").unwrap();

        assert_eq!(version, "3.10.4");
        assert_eq!(interpreter, bin.join("python"));
    }

    #[test]
    fn find_interpreter_reports_missing_binary() {
        let temp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        runner.respond_success("pyenv root", &format!("{}\n", temp.path().display()));
        runner.respond_success("pyenv versions", PYENV_VERSIONS);
        let catalog = VersionCatalog::new(&runner, pyenv());

        let err = catalog.find_interpreter("3.9").unwrap_err();

        match err {
            MkvenvError::Resolution(ResolutionError::InterpreterMissing { path }) => {
                assert!(path.ends_with("versions/3.9.18/bin/python"));
            }
            other => panic!("Expected InterpreterMissing, got {other:?}"),
        }
    }

    #[test]
    fn find_interpreter_without_match() {
        let runner = MockRunner::new();
        runner.respond_success("pyenv versions", "  3.8.10\n");
        let catalog = VersionCatalog::new(&runner, pyenv());

        let err = catalog.find_interpreter("3.11").unwrap_err();

        assert!(matches!(
            err,
            MkvenvError::Resolution(ResolutionError::NoMatch { .. })
        ));
        assert_eq!(runner.call_count("pyenv root"), 0);
    }

    #[test]
    fn custom_manager_commands() {
        let runner = MockRunner::new();
        runner.respond_success("asdf where python", "/opt/asdf\n");
        let manager = VersionManagerConfig {
            program: "asdf".to_string(),
            root_args: vec!["where".to_string(), "python".to_string()],
            versions_args: vec!["list".to_string(), "python".to_string()],
        };
        let catalog = VersionCatalog::new(&runner, manager);

        assert_eq!(catalog.root().unwrap(), Path::new("/opt/asdf"));
    }
}
