//! Handlers for the `/users` resource.
//!
//! Listing is public; everything else requires a bearer token. Tokens carry
//! no roles, so any authenticated caller may manage any account.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use nodeloom_core::error::CoreError;
use nodeloom_core::types::parse_id;
use nodeloom_core::users::{validate_email, validate_password, validate_username};
use nodeloom_db::models::user::{CreateUser, UpdateUser, UserResponse, UserSummary};
use nodeloom_db::repositories::UserRepo;
use serde::Deserialize;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /register` and `POST /users/`.
#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for `PUT /users/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
///
/// Public, so only [`UserSummary`] fields are returned.
pub async fn list_users(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserSummary>>>> {
    let users = UserRepo::list(state.store.as_ref()).await?;
    let data = users.iter().map(UserSummary::from).collect();
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/users/
///
/// Same listing as [`list_users`] behind a bearer token.
pub async fn list_users_authenticated(
    _auth: AuthUser,
    state: State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserSummary>>>> {
    list_users(state).await
}

/// POST /api/v1/users/
pub async fn create_user(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let user = create_account(&state, input).await?;
    tracing::info!(created_by = %auth.user_id, user_id = %user.id, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let id = parse_id(&id, "user")?.to_string();
    let user = UserRepo::find_by_id(state.store.as_ref(), &id)
        .await?
        .ok_or_else(|| user_not_found(&id))?;
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// PUT /api/v1/users/{id}
///
/// A new password is re-hashed. Renaming to a username held by another
/// account is a conflict.
pub async fn update_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(input): ValidJson<UpdateUserRequest>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let id = parse_id(&id, "user")?.to_string();
    let store = state.store.as_ref();

    let mut changes = UpdateUser::default();
    if let Some(username) = input.username {
        validate_username(&username)?;
        if let Some(holder) = UserRepo::find_by_username(store, &username).await? {
            if holder.id != id {
                return Err(username_taken(&username));
            }
        }
        changes.username = Some(username);
    }
    if let Some(email) = input.email {
        validate_email(&email)?;
        changes.email = Some(email);
    }
    if let Some(password) = input.password {
        validate_password(&password)?;
        changes.password_hash = Some(hash(&password)?);
    }
    if changes.is_empty() {
        return Err(AppError::BadRequest("No fields to update".into()));
    }

    let user = UserRepo::update(store, &id, &changes)
        .await?
        .ok_or_else(|| user_not_found(&id))?;
    tracing::info!(updated_by = %auth.user_id, user_id = %user.id, "User updated");
    Ok(Json(DataResponse {
        data: UserResponse::from(&user),
    }))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id, "user")?.to_string();
    UserRepo::delete(state.store.as_ref(), &id).await?;
    tracing::info!(deleted_by = %auth.user_id, user_id = %id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate, check the username is free, hash, and insert.
///
/// Shared by public registration and the protected create route. The
/// username check and the insert are two separate calls, so two concurrent
/// registrations can still race; the store's unique constraint is the
/// final guard.
pub(crate) async fn create_account(
    state: &AppState,
    input: CreateAccountRequest,
) -> AppResult<UserResponse> {
    validate_username(&input.username)?;
    validate_password(&input.password)?;
    let email = input.email.filter(|e| !e.trim().is_empty());
    if let Some(email) = &email {
        validate_email(email)?;
    }

    let store = state.store.as_ref();
    if UserRepo::find_by_username(store, &input.username)
        .await?
        .is_some()
    {
        return Err(username_taken(&input.username));
    }

    let new_user = CreateUser {
        username: input.username,
        email,
        password_hash: hash(&input.password)?,
    };
    let user = UserRepo::create(store, &new_user).await?;
    Ok(UserResponse::from(&user))
}

fn hash(password: &str) -> AppResult<String> {
    hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
}

fn user_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "User",
        id: id.to_string(),
    })
}

fn username_taken(username: &str) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "Username '{username}' is already taken"
    )))
}
