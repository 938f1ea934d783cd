//! Node entity model.

use nodeloom_core::graph::{NodeType, Position};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Free-form node attributes: string keys to arbitrary JSON values.
pub type NodeData = serde_json::Map<String, serde_json::Value>;

/// A typed, positioned vertex owned by one workspace through `workspace_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: Uuid,
    pub workspace_id: Uuid,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: NodeData,
    pub position: Position,
}

impl Node {
    /// Allocate a node id client-side. The id only becomes real once the
    /// insert is acknowledged.
    pub fn new(
        workspace_id: Uuid,
        node_type: NodeType,
        label: impl Into<String>,
        data: NodeData,
        position: Position,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            node_type,
            label: label.into(),
            data,
            position,
        }
    }
}

/// A `null` data column reads as an empty map.
fn null_as_empty<'de, D>(deserializer: D) -> Result<NodeData, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NodeData>::deserialize(deserializer)?.unwrap_or_default())
}
