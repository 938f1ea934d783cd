//! Workspace-level operations the remote store has no native support for:
//! creating an empty graph, fetching a workspace with its children, and
//! node/edge membership changes.
//!
//! Every operation issues its store calls one after another. Nothing is
//! transactional: if a later call fails, earlier writes stay applied and the
//! failure is reported for the failing step only.

use std::sync::Arc;

use nodeloom_core::graph::{NodeType, Position};
use uuid::Uuid;

use crate::error::StoreError;
use crate::gateway::RemoteStore;
use crate::models::edge::Edge;
use crate::models::node::{Node, NodeData};
use crate::models::workspace::Workspace;
use crate::repositories::{EdgeRepo, NodeRepo, WorkspaceRepo};

/// Input for [`WorkspaceService::add_node`].
#[derive(Debug, Clone)]
pub struct NewNode {
    pub node_type: NodeType,
    pub label: String,
    pub data: NodeData,
    pub position: Position,
}

/// Workspace composition over an injected [`RemoteStore`].
///
/// Cheap to clone; built once at startup and shared through the app state.
#[derive(Clone)]
pub struct WorkspaceService {
    store: Arc<dyn RemoteStore>,
}

impl WorkspaceService {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self { store }
    }

    /// Create an empty workspace under a freshly generated id.
    ///
    /// If the insert fails the id is dropped and never surfaces to the caller.
    pub async fn create(&self, name: &str) -> Result<Workspace, StoreError> {
        let workspace = Workspace::new(name);
        let created = WorkspaceRepo::create(self.store.as_ref(), &workspace).await?;
        tracing::info!(workspace_id = %created.id, "Workspace created");
        Ok(created)
    }

    /// All workspace rows, without their nodes and edges.
    pub async fn list(&self) -> Result<Vec<Workspace>, StoreError> {
        WorkspaceRepo::list(self.store.as_ref()).await
    }

    /// Fetch a workspace together with its nodes and edges.
    ///
    /// Three independent reads; a concurrent write between them can yield a
    /// torn view.
    pub async fn get(&self, id: Uuid) -> Result<Workspace, StoreError> {
        let store = self.store.as_ref();
        let mut workspace = WorkspaceRepo::find_by_id(store, id)
            .await?
            .ok_or_else(|| StoreError::not_found("Workspace", id))?;

        workspace.nodes = NodeRepo::list_for_workspace(store, id).await?;
        workspace.edges = EdgeRepo::list_for_workspace(store, id).await?;
        Ok(workspace)
    }

    /// Rename a workspace. Returns the updated row without children.
    pub async fn rename(&self, id: Uuid, name: &str) -> Result<Workspace, StoreError> {
        let updated = WorkspaceRepo::rename(self.store.as_ref(), id, name)
            .await?
            .ok_or_else(|| StoreError::not_found("Workspace", id))?;
        tracing::info!(workspace_id = %id, "Workspace renamed");
        Ok(updated)
    }

    /// Delete the workspace row.
    ///
    /// Nodes and edges referencing the workspace are left in place.
    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        WorkspaceRepo::delete(self.store.as_ref(), id).await?;
        tracing::info!(workspace_id = %id, "Workspace deleted (children not removed)");
        Ok(())
    }

    pub async fn add_node(&self, workspace_id: Uuid, input: NewNode) -> Result<Node, StoreError> {
        let node = Node::new(
            workspace_id,
            input.node_type,
            input.label,
            input.data,
            input.position,
        );
        let created = NodeRepo::create(self.store.as_ref(), &node).await?;
        tracing::info!(
            %workspace_id,
            node_id = %created.id,
            node_type = %created.node_type,
            "Node added"
        );
        Ok(created)
    }

    pub async fn remove_node(&self, workspace_id: Uuid, node_id: Uuid) -> Result<(), StoreError> {
        NodeRepo::delete(self.store.as_ref(), workspace_id, node_id).await?;
        tracing::info!(%workspace_id, %node_id, "Node removed");
        Ok(())
    }

    /// Connect two node ids. Endpoints are not checked for existence.
    pub async fn add_edge(
        &self,
        workspace_id: Uuid,
        source: Uuid,
        target: Uuid,
    ) -> Result<Edge, StoreError> {
        let edge = Edge::new(workspace_id, source, target);
        let created = EdgeRepo::create(self.store.as_ref(), &edge).await?;
        tracing::info!(%workspace_id, edge_id = %created.id, "Edge added");
        Ok(created)
    }

    pub async fn remove_edge(&self, workspace_id: Uuid, edge_id: Uuid) -> Result<(), StoreError> {
        EdgeRepo::delete(self.store.as_ref(), workspace_id, edge_id).await?;
        tracing::info!(%workspace_id, %edge_id, "Edge removed");
        Ok(())
    }
}
