//! Shared response envelope types for API handlers.
//!
//! Entity responses use a `{ "data": ... }` envelope. Login and health
//! return their payloads unwrapped.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// ```ignore
/// Ok(Json(DataResponse { data: workspace }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
