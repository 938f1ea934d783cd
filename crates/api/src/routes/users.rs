//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Both `/users` and `/users/` are registered; axum treats them as
/// different paths.
///
/// ```text
/// GET    /users            -> list_users (public)
/// GET    /users/           -> list_users_authenticated (requires auth)
/// POST   /users, /users/   -> create_user (requires auth)
/// GET    /users/{id}       -> get_user (requires auth)
/// PUT    /users/{id}       -> update_user (requires auth)
/// DELETE /users/{id}       -> delete_user (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/",
            get(users::list_users_authenticated).post(users::create_user),
        )
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
}
