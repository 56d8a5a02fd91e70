//! Numeric ordering of installed version strings.

/// Sort key for a dotted version string.
///
/// Each dot-separated component contributes the value of its leading
/// digits, or 0 when it has none. Keys compare component-wise; when all
/// shared components are equal the longer key is greater, so `3.10`
/// sorts below `3.10.4`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionKey(Vec<u64>);

impl VersionKey {
    /// Parse a version string into its key.
    pub fn parse(version: &str) -> Self {
        Self(version.split('.').map(leading_number).collect())
    }
}

/// Leading digits of a component; values past `u64::MAX` saturate.
fn leading_number(component: &str) -> u64 {
    let digits: String = component
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(u64::MAX)
}
