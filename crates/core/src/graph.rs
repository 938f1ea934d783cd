//! Workspace graph vocabulary: node kinds, positions, and name/label rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length (in characters) of a workspace name.
pub const MAX_WORKSPACE_NAME_LEN: usize = 255;

/// Maximum length (in characters) of a node label.
pub const MAX_NODE_LABEL_LEN: usize = 255;

/// The closed set of node kinds a workspace graph may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeType {
    Input,
    Output,
    Process,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Input => "INPUT",
            NodeType::Output => "OUTPUT",
            NodeType::Process => "PROCESS",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canvas coordinates of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Validate a workspace name and return it trimmed.
pub fn validate_workspace_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Workspace name must not be empty".into(),
        ));
    }
    if trimmed.chars().count() > MAX_WORKSPACE_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Workspace name must be at most {MAX_WORKSPACE_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Validate a node label. Labels are display strings and keep their whitespace.
pub fn validate_node_label(label: &str) -> Result<(), CoreError> {
    if label.trim().is_empty() {
        return Err(CoreError::Validation("Node label must not be empty".into()));
    }
    if label.chars().count() > MAX_NODE_LABEL_LEN {
        return Err(CoreError::Validation(format!(
            "Node label must be at most {MAX_NODE_LABEL_LEN} characters"
        )));
    }
    Ok(())
}

/// Coordinates must be finite; the remote store cannot persist NaN or infinity in JSON.
pub fn validate_position(position: &Position) -> Result<(), CoreError> {
    if !position.x.is_finite() || !position.y.is_finite() {
        return Err(CoreError::Validation(
            "Node position must have finite coordinates".into(),
        ));
    }
    Ok(())
}
