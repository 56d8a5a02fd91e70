//! Interpreter version lookup.
//!
//! - [`catalog`] - Memoized queries against the version manager
//! - [`resolver`] - Best-match selection for a version specifier
//! - [`version`] - Numeric version ordering

pub mod catalog;
pub mod resolver;
pub mod version;

pub use catalog::{parse_versions, VersionCatalog};
pub use resolver::resolve;
pub use version::VersionKey;
