//! Workspace entity model and DTOs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::edge::Edge;
use super::node::Node;

/// A named graph container.
///
/// Nodes and edges live in their own resources and are attached by the
/// workspace service; a bare workspace row decodes with both collections empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Workspace {
    /// A fresh, empty workspace with a client-generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

/// Persisted columns of a workspace row.
#[derive(Debug, Serialize)]
pub struct WorkspaceRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
}

impl<'a> From<&'a Workspace> for WorkspaceRow<'a> {
    fn from(ws: &'a Workspace) -> Self {
        Self {
            id: ws.id,
            name: &ws.name,
        }
    }
}

/// Partial update payload: only the name is mutable.
#[derive(Debug, Serialize)]
pub struct RenameWorkspace<'a> {
    pub name: &'a str,
}
