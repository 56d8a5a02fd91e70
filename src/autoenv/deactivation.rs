//! Deactivation marker handling.

/// Marker that deactivates the environment on leaving the directory.
pub const DEACTIVATE: &str = "deactivate";

/// Comment written above the marker.
pub const DEACTIVATION_HEADER: &str = "# deactivate venv when leaving";

/// Content to write, or `None` when the marker is already present anywhere.
pub fn plan_deactivation(content: &str) -> Option<String> {
    if content.contains(DEACTIVATE) {
        return None;
    }

    let appended = format!(
        "{}\n{}\n{}",
        content.trim_end(),
        DEACTIVATION_HEADER,
        DEACTIVATE
    );
    Some(appended.trim().to_string())
}
