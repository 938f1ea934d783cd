//! Route definitions for the `/workspaces` resource and its nodes and edges.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::workspaces;
use crate::state::AppState;

/// All routes require auth.
///
/// ```text
/// GET, POST           /workspaces
/// GET, PUT, DELETE    /workspaces/{id}
/// POST                /workspaces/{id}/nodes
/// DELETE              /workspaces/{id}/nodes/{node_id}
/// POST                /workspaces/{id}/edges
/// DELETE              /workspaces/{id}/edges/{edge_id}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/workspaces",
            get(workspaces::list_workspaces).post(workspaces::create_workspace),
        )
        .route(
            "/workspaces/{id}",
            get(workspaces::get_workspace)
                .put(workspaces::update_workspace)
                .delete(workspaces::delete_workspace),
        )
        .route("/workspaces/{id}/nodes", post(workspaces::add_node))
        .route(
            "/workspaces/{id}/nodes/{node_id}",
            delete(workspaces::remove_node),
        )
        .route("/workspaces/{id}/edges", post(workspaces::add_edge))
        .route(
            "/workspaces/{id}/edges/{edge_id}",
            delete(workspaces::remove_edge),
        )
}
