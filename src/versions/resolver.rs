//! Version specifier resolution.
//!
//! Picks the best installed version for a user-supplied specifier:
//! 1. An exact string match wins immediately
//! 2. Otherwise every version starting with the specifier is a candidate
//! 3. The numerically greatest candidate is chosen
//!
//! Matching is a literal string prefix, so `3.1` also matches `3.10.4`.

use crate::error::{MkvenvError, ResolutionError, Result};

use super::version::VersionKey;

/// Resolve `specifier` against the installed versions.
///
/// Returns the catalog's own string for the chosen version.
///
/// # Example
///
/// ```
/// use mkvenv::versions::resolve;
///
/// let installed = ["3.8.10", "3.9.18", "3.10.0", "3.10.4"].map(String::from);
/// assert_eq!(resolve("3.10", &installed).unwrap(), "3.10.4");
/// assert_eq!(resolve("3.9.18", &installed).unwrap(), "3.9.18");
/// ```
pub fn resolve(specifier: &str, installed: &[String]) -> Result<String> {
    if specifier.is_empty() {
        return Err(MkvenvError::InvalidRequest {
            message: "Version required to lookup python exec".to_string(),
        });
    }

    if let Some(exact) = installed.iter().find(|v| v.as_str() == specifier) {
        return Ok(exact.clone());
    }

    installed
        .iter()
        .filter(|v| v.starts_with(specifier))
        .max_by_key(|v| VersionKey::parse(v))
        .cloned()
        .ok_or_else(|| {
            ResolutionError::NoMatch {
                specifier: specifier.to_string(),
                candidates: installed.to_vec(),
            }
            .into()
        })
}
