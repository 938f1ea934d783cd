//! Repository for the `workspaces` resource.
//!
//! Rows carry only `id` and `name`; nodes and edges are separate resources.

use uuid::Uuid;

use crate::error::StoreError;
use crate::filter::Resource;
use crate::gateway::RemoteStore;
use crate::models::workspace::{RenameWorkspace, Workspace, WorkspaceRow};

use super::rest;

const TABLE: &str = "workspaces";

pub struct WorkspaceRepo;

impl WorkspaceRepo {
    /// Insert the workspace row. Nested node/edge collections are not sent.
    pub async fn create(store: &dyn RemoteStore, workspace: &Workspace) -> Result<Workspace, StoreError> {
        let row = WorkspaceRow::from(workspace);
        rest::insert_one(store, TABLE, "workspace", "insert workspace", &row).await
    }

    pub async fn list(store: &dyn RemoteStore) -> Result<Vec<Workspace>, StoreError> {
        rest::select(store, &Resource::table(TABLE), "list workspaces").await
    }

    pub async fn find_by_id(store: &dyn RemoteStore, id: Uuid) -> Result<Option<Workspace>, StoreError> {
        let resource = Resource::table(TABLE).eq("id", id);
        let rows: Vec<Workspace> = rest::select(store, &resource, "get workspace").await?;
        Ok(rows.into_iter().next())
    }

    /// Rename a workspace. Returns `None` if no row was patched.
    pub async fn rename(
        store: &dyn RemoteStore,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Workspace>, StoreError> {
        let resource = Resource::table(TABLE).eq("id", id);
        let rows: Vec<Workspace> =
            rest::patch(store, &resource, "update workspace", &RenameWorkspace { name }).await?;
        Ok(rows.into_iter().next())
    }

    /// Delete the workspace row only. Child nodes and edges are untouched.
    pub async fn delete(store: &dyn RemoteStore, id: Uuid) -> Result<(), StoreError> {
        let resource = Resource::table(TABLE).eq("id", id);
        rest::delete(store, &resource, "delete workspace").await
    }
}
