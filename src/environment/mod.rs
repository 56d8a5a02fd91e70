//! Environment requests and provisioning.

pub mod provisioner;
pub mod request;

pub use provisioner::{normalize_target, EnvironmentProvisioner, ProvisionOutcome};
pub use request::EnvironmentRequest;
