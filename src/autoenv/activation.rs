//! Activation binding detection and rewriting.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// First line that sources or activates something.
static BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(activate|source)\s+.+$").expect("BINDING regex must compile")
});

/// Comment written above a newly appended binding.
pub const ACTIVATION_HEADER: &str = "# Activate venv upon entering the directory";

/// What patching the activation file would do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationPlan {
    /// No binding present; write this content.
    Append(String),
    /// The binding already sources the requested environment.
    Unchanged,
    /// Another binding is present. `replaced` is the content to write if the
    /// user agrees.
    Conflict { existing: String, replaced: String },
}

/// The line that activates `<location>/<name>`.
pub fn activation_line(name: &str, location: &Path) -> String {
    let location = location.display().to_string();
    format!("source {}/{}", location.trim_end_matches('/'), name)
}

/// Find the first activation binding in `content`.
pub fn find_binding(content: &str) -> Option<&str> {
    BINDING.find(content).map(|m| m.as_str())
}

/// Decide how to bring `content` in line with `line`.
pub fn plan_activation(content: &str, line: &str) -> ActivationPlan {
    match BINDING.find(content) {
        None => {
            let body = content.trim_end();
            let appended = if body.trim().is_empty() {
                format!("{}\n{}", ACTIVATION_HEADER, line)
            } else {
                format!("{}\n\n{}\n{}", body, ACTIVATION_HEADER, line)
            };
            ActivationPlan::Append(appended.trim().to_string())
        }
        Some(found) if found.as_str() == line => ActivationPlan::Unchanged,
        Some(found) => {
            let mut replaced = String::with_capacity(content.len() + line.len());
            replaced.push_str(&content[..found.start()]);
            replaced.push_str(line);
            replaced.push_str(&content[found.end()..]);
            ActivationPlan::Conflict {
                existing: found.as_str().to_string(),
                replaced: replaced.trim().to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_line_joins_location_and_name() {
        let line = activation_line("venv", Path::new("/home/u/venv"));
        assert_eq!(line, "source /home/u/venv/venv");
    }

    #[test]
    fn absolute_name_keeps_location_prefix() {
        let line = activation_line("/abs", Path::new("/home/u/venv"));
        assert_eq!(line, "source /home/u/venv//abs");
    }

    #[test]
    fn root_location_has_single_separator() {
        assert_eq!(activation_line("venv", Path::new("/")), "source /venv");
    }

    #[test]
    fn empty_content_gets_header_and_line() {
        let plan = plan_activation("", "source /v/venv");
        assert_eq!(
            plan,
            ActivationPlan::Append(
                "# Activate venv upon entering the directory\nsource /v/venv".into()
            )
        );
    }

    #[test]
    fn whitespace_only_content_counts_as_empty() {
        let plan = plan_activation("\n\n  \n", "source /v/venv");
        assert_eq!(
            plan,
            ActivationPlan::Append(
                "# Activate venv upon entering the directory\nsource /v/venv".into()
            )
        );
    }

    #[test]
    fn existing_content_is_kept_above_new_binding() {
        let plan = plan_activation("export FOO=1\n\n", "source /v/venv");
        assert_eq!(
            plan,
            ActivationPlan::Append(
                "export FOO=1\n\n# Activate venv upon entering the directory\nsource /v/venv"
                    .into()
            )
        );
    }

    #[test]
    fn identical_binding_is_unchanged() {
        let content = "# header\nsource /v/venv\n";
        assert_eq!(
            plan_activation(content, "source /v/venv"),
            ActivationPlan::Unchanged
        );
    }

    #[test]
    fn conflicting_binding_is_replaced_in_place() {
        let content = "export A=1\nsource /old/env\nexport B=2\n";
        let plan = plan_activation(content, "source /v/venv");
        assert_eq!(
            plan,
            ActivationPlan::Conflict {
                existing: "source /old/env".into(),
                replaced: "export A=1\nsource /v/venv\nexport B=2".into(),
            }
        );
    }

    #[test]
    fn activate_lines_count_as_bindings() {
        assert_eq!(
            find_binding("echo hi\nactivate myenv\n"),
            Some("activate myenv")
        );
    }

    #[test]
    fn only_first_binding_is_considered() {
        let content = "source /v/venv\nsource /other\n";
        assert_eq!(find_binding(content), Some("source /v/venv"));
        assert_eq!(
            plan_activation(content, "source /v/venv"),
            ActivationPlan::Unchanged
        );
    }

    #[test]
    fn indented_source_is_not_a_binding() {
        assert_eq!(find_binding("  source /v/venv\n"), None);
        assert_eq!(find_binding("sourced /v/venv\n"), None);
    }
}
