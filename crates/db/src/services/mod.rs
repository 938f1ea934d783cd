//! Services composing several repository calls into one operation.

pub mod workspace_service;

pub use workspace_service::{NewNode, WorkspaceService};
