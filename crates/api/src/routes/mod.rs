pub mod auth;
pub mod health;
pub mod users;
pub mod workspaces;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /health                                   liveness (public)
/// /register, /login                         account entry (public)
/// /users                                    list (public), create (auth)
/// /users/{id}                               get, update, delete (auth)
/// /workspaces                               list, create (auth)
/// /workspaces/{id}                          get, rename, delete (auth)
/// /workspaces/{id}/nodes[/{node_id}]        add, remove (auth)
/// /workspaces/{id}/edges[/{edge_id}]        add, remove (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(users::router())
        .merge(workspaces::router())
}
