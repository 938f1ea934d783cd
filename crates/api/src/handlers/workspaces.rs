//! Handlers for `/workspaces` and the nested node and edge routes.
//!
//! Path ids are parsed as UUIDs before any store call is made.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nodeloom_core::graph::{
    validate_node_label, validate_position, validate_workspace_name, NodeType, Position,
};
use nodeloom_core::types::parse_id;
use nodeloom_db::models::edge::Edge;
use nodeloom_db::models::node::{Node, NodeData};
use nodeloom_db::models::workspace::Workspace;
use nodeloom_db::services::NewNode;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::extract::ValidJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /workspaces` and `PUT /workspaces/{id}`.
#[derive(Debug, Deserialize)]
pub struct WorkspaceNameRequest {
    pub name: String,
}

/// Request body for `POST /workspaces/{id}/nodes`.
#[derive(Debug, Deserialize)]
pub struct CreateNodeRequest {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub label: String,
    #[serde(default)]
    pub data: NodeData,
    pub position: Position,
}

/// Request body for `POST /workspaces/{id}/edges`.
#[derive(Debug, Deserialize)]
pub struct CreateEdgeRequest {
    pub source: Uuid,
    pub target: Uuid,
}

// ---------------------------------------------------------------------------
// Workspaces
// ---------------------------------------------------------------------------

/// POST /api/v1/workspaces
pub async fn create_workspace(
    _auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<WorkspaceNameRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Workspace>>)> {
    let name = validate_workspace_name(&input.name)?;
    let workspace = state.workspaces.create(&name).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: workspace })))
}

/// GET /api/v1/workspaces
pub async fn list_workspaces(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Workspace>>>> {
    let workspaces = state.workspaces.list().await?;
    Ok(Json(DataResponse { data: workspaces }))
}

/// GET /api/v1/workspaces/{id}
pub async fn get_workspace(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Workspace>>> {
    let id = parse_id(&id, "workspace")?;
    let workspace = state.workspaces.get(id).await?;
    Ok(Json(DataResponse { data: workspace }))
}

/// PUT /api/v1/workspaces/{id}
pub async fn update_workspace(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<WorkspaceNameRequest>,
) -> AppResult<Json<DataResponse<Workspace>>> {
    let id = parse_id(&id, "workspace")?;
    let name = validate_workspace_name(&input.name)?;
    let workspace = state.workspaces.rename(id, &name).await?;
    Ok(Json(DataResponse { data: workspace }))
}

/// DELETE /api/v1/workspaces/{id}
///
/// Nodes and edges of the workspace are not removed.
pub async fn delete_workspace(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, "workspace")?;
    state.workspaces.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Nodes
// ---------------------------------------------------------------------------

/// POST /api/v1/workspaces/{id}/nodes
pub async fn add_node(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<CreateNodeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Node>>)> {
    let workspace_id = parse_id(&id, "workspace")?;
    validate_node_label(&input.label)?;
    validate_position(&input.position)?;

    let node = state
        .workspaces
        .add_node(
            workspace_id,
            NewNode {
                node_type: input.node_type,
                label: input.label,
                data: input.data,
                position: input.position,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: node })))
}

/// DELETE /api/v1/workspaces/{id}/nodes/{node_id}
pub async fn remove_node(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((id, node_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let workspace_id = parse_id(&id, "workspace")?;
    let node_id = parse_id(&node_id, "node")?;
    state.workspaces.remove_node(workspace_id, node_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// POST /api/v1/workspaces/{id}/edges
pub async fn add_edge(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<CreateEdgeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Edge>>)> {
    let workspace_id = parse_id(&id, "workspace")?;
    let edge = state
        .workspaces
        .add_edge(workspace_id, input.source, input.target)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: edge })))
}

/// DELETE /api/v1/workspaces/{id}/edges/{edge_id}
pub async fn remove_edge(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((id, edge_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let workspace_id = parse_id(&id, "workspace")?;
    let edge_id = parse_id(&edge_id, "edge")?;
    state.workspaces.remove_edge(workspace_id, edge_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
