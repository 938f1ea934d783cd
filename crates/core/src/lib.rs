//! Domain types, validation rules and errors shared by the store and API crates.

pub mod error;
pub mod graph;
pub mod types;
pub mod users;
