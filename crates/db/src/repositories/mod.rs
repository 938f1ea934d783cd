//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&dyn RemoteStore` as the first argument.

mod rest;

pub mod edge_repo;
pub mod node_repo;
pub mod user_repo;
pub mod workspace_repo;

pub use edge_repo::EdgeRepo;
pub use node_repo::NodeRepo;
pub use user_repo::UserRepo;
pub use workspace_repo::WorkspaceRepo;
