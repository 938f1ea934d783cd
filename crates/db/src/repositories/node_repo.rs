//! Repository for the `nodes` resource.

use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::Resource;
use crate::gateway::RemoteStore;
use crate::models::node::Node;

use super::rest;

const TABLE: &str = "nodes";

pub struct NodeRepo;

impl NodeRepo {
    pub async fn create(store: &dyn RemoteStore, node: &Node) -> Result<Node, StoreError> {
        rest::insert_one(store, TABLE, "node", "add node", node).await
    }

    /// All nodes owned by a workspace, in the order the store returns them.
    pub async fn list_for_workspace(
        store: &dyn RemoteStore,
        workspace_id: Uuid,
    ) -> Result<Vec<Node>, StoreError> {
        let resource = Resource::table(TABLE).eq("workspace_id", workspace_id);
        rest::select(store, &resource, "get nodes").await
    }

    /// Delete a node, scoped to its owning workspace.
    pub async fn delete(
        store: &dyn RemoteStore,
        workspace_id: Uuid,
        node_id: Uuid,
    ) -> Result<(), StoreError> {
        let resource = Resource::table(TABLE)
            .eq("id", node_id)
            .eq("workspace_id", workspace_id);
        rest::delete(store, &resource, "remove node").await
    }
}
