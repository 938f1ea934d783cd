//! Handlers for registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use nodeloom_core::error::CoreError;
use nodeloom_db::models::user::UserResponse;
use nodeloom_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::extract::ValidJson;
use crate::handlers::users::{create_account, CreateAccountRequest};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /login`. `username` may also be an email address.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<CreateAccountRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    let user = create_account(&state, input).await?;
    tracing::info!(user_id = %user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// POST /api/v1/login
///
/// Look the account up by username or email, verify the password, and
/// issue an access token. Every failure mode answers with the same 401.
pub async fn login(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let identifier = input.username.trim();
    if identifier.is_empty() || input.password.is_empty() {
        return Err(invalid_credentials());
    }

    let candidates = UserRepo::find_by_username_or_email(state.store.as_ref(), identifier).await?;

    let mut matched = None;
    for user in candidates {
        let valid = verify_password(&input.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
        if valid {
            matched = Some(user);
            break;
        }
    }
    let user = matched.ok_or_else(invalid_credentials)?;

    let jwt = &state.config.jwt;
    let token = generate_access_token(&user.id, &user.username, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, "User logged in");
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: jwt.expires_in_secs(),
        user: UserResponse::from(&user),
    }))
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}
