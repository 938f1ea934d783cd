//! Entity structs and the wire payloads sent to the remote store.
//!
//! Each submodule contains the row struct decoded from store responses plus
//! the `Serialize` payloads for inserts and partial updates. Payloads carry
//! only persisted columns.

pub mod edge;
pub mod node;
pub mod user;
pub mod workspace;
