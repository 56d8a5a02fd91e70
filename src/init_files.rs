//! Package directory scaffolding.
//!
//! Creates directories and drops an empty `__init__.py` into every level
//! between the working directory and each target, and into every directory
//! beneath the targets.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{MkvenvError, Result};

/// Marker file that turns a directory into a Python package.
pub const INIT_FILE: &str = "__init__.py";

/// Create missing `__init__.py` files for `targets`.
///
/// Relative targets are taken relative to `base`, and every target must end
/// up inside `base`. Existing files are left untouched. Returns the files
/// created, in creation order.
pub fn make_init_files(base: &Path, targets: &[PathBuf], make_dirs: bool) -> Result<Vec<PathBuf>> {
    let base = base.canonicalize()?;

    let mut resolved = Vec::with_capacity(targets.len());
    for target in targets {
        let lexical = normalize(&base.join(target));
        ensure_within(&base, &lexical)?;
        if make_dirs {
            if let Some(existing) = lexical.ancestors().find(|dir| dir.exists()) {
                ensure_within(&base, &existing.canonicalize()?)?;
            }
            fs::create_dir_all(&lexical)?;
        }
        let canonical = lexical.canonicalize().map_err(|e| MkvenvError::InvalidRequest {
            message: format!("cannot resolve target {}: {}", target.display(), e),
        })?;
        ensure_within(&base, &canonical)?;
        resolved.push(canonical);
    }

    let mut pending: Vec<PathBuf> = Vec::new();
    for target in &resolved {
        for dir in levels(&base, target).into_iter().chain(subdirectories(target)?) {
            let init = dir.join(INIT_FILE);
            if !init.exists() && !pending.contains(&init) {
                pending.push(init);
            }
        }
    }

    for init in &pending {
        fs::write(init, "")?;
    }

    tracing::info!("Touched {} {} files", pending.len(), INIT_FILE);
    for init in &pending {
        tracing::debug!("  {}", init.display());
    }

    Ok(pending)
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn ensure_within(base: &Path, path: &Path) -> Result<()> {
    if path.starts_with(base) {
        Ok(())
    } else {
        Err(MkvenvError::InvalidRequest {
            message: format!(
                "targets must be within {}: {}",
                base.display(),
                path.display()
            ),
        })
    }
}

/// Every directory below `base` down to and including `target`.
fn levels(base: &Path, target: &Path) -> Vec<PathBuf> {
    let Ok(relative) = target.strip_prefix(base) else {
        return Vec::new();
    };

    let mut current = base.to_path_buf();
    relative
        .components()
        .map(|component| {
            current.push(component);
            current.clone()
        })
        .collect()
}

/// Every directory beneath `root`, parents before children. Symlinks are not
/// followed.
fn subdirectories(root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let mut children: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .map(|entry| entry.path())
            .collect();
        children.sort();

        found.extend(children.iter().cloned());
        stack.extend(children.into_iter().rev());
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn base() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let base = temp.path().canonicalize().unwrap();
        (temp, base)
    }

    #[test]
    fn creates_dirs_and_every_level() {
        let (_temp, base) = base();

        let touched = make_init_files(&base, &[PathBuf::from("proj/sub")], true).unwrap();

        assert_eq!(
            touched,
            vec![
                base.join("proj").join(INIT_FILE),
                base.join("proj/sub").join(INIT_FILE),
            ]
        );
        assert!(!base.join(INIT_FILE).exists());
        assert!(base.join("proj/sub/__init__.py").is_file());
    }

    #[test]
    fn walks_existing_subdirectories() {
        let (_temp, base) = base();
        fs::create_dir_all(base.join("pkg/a/deep")).unwrap();
        fs::create_dir_all(base.join("pkg/b")).unwrap();

        let touched = make_init_files(&base, &[PathBuf::from("pkg")], false).unwrap();

        assert_eq!(touched.len(), 4);
        assert!(base.join("pkg/a/deep/__init__.py").exists());
        assert!(base.join("pkg/b/__init__.py").exists());
    }

    #[test]
    fn existing_init_files_are_skipped() {
        let (_temp, base) = base();
        fs::create_dir_all(base.join("pkg")).unwrap();
        fs::write(base.join("pkg/__init__.py"), "VERSION = 1\n").unwrap();

        let touched = make_init_files(&base, &[PathBuf::from("pkg")], true).unwrap();

        assert!(touched.is_empty());
        assert_eq!(
            fs::read_to_string(base.join("pkg/__init__.py")).unwrap(),
            "VERSION = 1\n"
        );
    }

    #[test]
    fn overlapping_targets_touch_once() {
        let (_temp, base) = base();

        let touched = make_init_files(
            &base,
            &[PathBuf::from("pkg/a"), PathBuf::from("pkg/b")],
            true,
        )
        .unwrap();

        assert_eq!(touched.len(), 3);
        assert_eq!(
            touched
                .iter()
                .filter(|p| **p == base.join("pkg").join(INIT_FILE))
                .count(),
            1
        );
    }

    #[test]
    fn rejects_targets_outside_base() {
        let (_temp, base) = base();
        let outside = TempDir::new().unwrap();

        let err = make_init_files(&base, &[outside.path().to_path_buf()], false).unwrap_err();

        assert!(matches!(err, MkvenvError::InvalidRequest { .. }));
        assert!(err.to_string().contains("must be within"));
    }

    #[test]
    fn escaping_target_is_rejected_before_creating_dirs() {
        let (_temp, base) = base();
        let name = format!("{}-escape", base.file_name().unwrap().to_string_lossy());
        let escaped = base.parent().unwrap().join(&name);

        let err = make_init_files(&base, &[PathBuf::from("..").join(&name)], true).unwrap_err();

        assert!(matches!(err, MkvenvError::InvalidRequest { .. }));
        assert!(!escaped.exists());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_out_of_base_is_rejected_before_creating_dirs() {
        let (_temp, base) = base();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), base.join("link")).unwrap();

        let err = make_init_files(&base, &[PathBuf::from("link/new")], true).unwrap_err();

        assert!(matches!(err, MkvenvError::InvalidRequest { .. }));
        assert!(!outside.path().join("new").exists());
    }

    #[test]
    fn parent_steps_inside_base_are_allowed() {
        let (_temp, base) = base();

        make_init_files(&base, &[PathBuf::from("pkg/../other/./sub")], true).unwrap();

        assert!(base.join("other/sub").join(INIT_FILE).is_file());
        assert!(!base.join("pkg").exists());
    }

    #[test]
    fn missing_target_without_make_dirs_fails() {
        let (_temp, base) = base();

        let err = make_init_files(&base, &[PathBuf::from("nope")], false).unwrap_err();

        assert!(matches!(err, MkvenvError::InvalidRequest { .. }));
        assert!(!base.join("nope").exists());
    }

    #[test]
    fn no_targets_is_a_no_op() {
        let (_temp, base) = base();
        assert!(make_init_files(&base, &[], true).unwrap().is_empty());
    }
}
