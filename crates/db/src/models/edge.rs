//! Edge entity model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A directed connection between two node ids.
///
/// Neither endpoint is checked for existence or workspace membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub source: Uuid,
    pub target: Uuid,
}

impl Edge {
    pub fn new(workspace_id: Uuid, source: Uuid, target: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            workspace_id,
            source,
            target,
        }
    }
}
