//! Workflow orchestration.

pub mod workflow;

pub use workflow::{Workflow, WorkflowReport};
