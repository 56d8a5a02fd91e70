//! Platform environment detection.

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Expand a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and `~user` forms, are returned unchanged.
pub fn expand_tilde(path: &std::path::Path) -> std::path::PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn expand_tilde_leaves_absolute_paths() {
        assert_eq!(expand_tilde(Path::new("/opt/venv")), PathBuf::from("/opt/venv"));
    }

    #[test]
    fn expand_tilde_leaves_relative_paths() {
        assert_eq!(expand_tilde(Path::new("envs/a")), PathBuf::from("envs/a"));
    }

    #[test]
    fn expand_tilde_replaces_home_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(Path::new("~/venv")), home.join("venv"));
            assert_eq!(expand_tilde(Path::new("~")), home);
        }
    }

    #[test]
    fn expand_tilde_ignores_other_users() {
        assert_eq!(expand_tilde(Path::new("~bob/venv")), PathBuf::from("~bob/venv"));
    }
}
