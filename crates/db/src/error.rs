/// Errors produced while talking to the remote store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The gateway was built without a usable base URL or key.
    #[error("Remote store misconfigured: {0}")]
    Configuration(String),

    /// The HTTP request itself failed (DNS, TLS, connection reset, timeout).
    #[error("Remote store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a status the operation does not accept.
    #[error("Remote store returned {status} during {operation}: {body}")]
    Upstream {
        operation: &'static str,
        status: u16,
        /// Raw response body, for logs only.
        body: String,
    },

    /// A payload could not be encoded or a response could not be decoded.
    #[error("Remote store payload error: {0}")]
    Json(#[from] serde_json::Error),

    /// An insert succeeded at the HTTP level but echoed no rows.
    #[error("No {entity} was inserted")]
    NothingInserted { entity: &'static str },

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: String },
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
