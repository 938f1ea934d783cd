//! Repository for the `edges` resource.

use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::Resource;
use crate::gateway::RemoteStore;
use crate::models::edge::Edge;

use super::rest;

const TABLE: &str = "edges";

pub struct EdgeRepo;

impl EdgeRepo {
    pub async fn create(store: &dyn RemoteStore, edge: &Edge) -> Result<Edge, StoreError> {
        rest::insert_one(store, TABLE, "edge", "add edge", edge).await
    }

    pub async fn list_for_workspace(
        store: &dyn RemoteStore,
        workspace_id: Uuid,
    ) -> Result<Vec<Edge>, StoreError> {
        let resource = Resource::table(TABLE).eq("workspace_id", workspace_id);
        rest::select(store, &resource, "get edges").await
    }

    /// Delete an edge, scoped to its owning workspace.
    pub async fn delete(
        store: &dyn RemoteStore,
        workspace_id: Uuid,
        edge_id: Uuid,
    ) -> Result<(), StoreError> {
        let resource = Resource::table(TABLE)
            .eq("id", edge_id)
            .eq("workspace_id", workspace_id);
        rest::delete(store, &resource, "remove edge").await
    }
}
