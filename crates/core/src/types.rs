use uuid::Uuid;

use crate::error::CoreError;

/// User identifiers are assigned by the remote store and treated as opaque.
pub type UserId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Parse a path segment as a UUID, naming the entity in the error message.
///
/// ```
/// use nodeloom_core::types::parse_id;
///
/// assert!(parse_id("not-a-uuid", "workspace").is_err());
/// ```
pub fn parse_id(raw: &str, entity: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(raw.trim()).map_err(|_| CoreError::Validation(format!("Invalid {entity} ID")))
}
