/// Domain-level errors raised by validation and lookups.
///
/// Transport and remote-store failures live in `nodeloom_db::error::StoreError`;
/// this enum only covers conditions the API reports back to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
