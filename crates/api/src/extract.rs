//! Request body extractors.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;

use crate::error::AppError;

/// `axum::Json` with rejections reported through [`AppError`].
///
/// Syntax errors, type mismatches, and a missing `Content-Type` all become
/// a 400 with the usual `{ error, code }` body, before any handler logic runs.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ValidJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
