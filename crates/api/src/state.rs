use std::sync::Arc;

use nodeloom_db::services::WorkspaceService;
use nodeloom_db::RemoteStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once at startup and never mutated; cloning copies `Arc`s only.
#[derive(Clone)]
pub struct AppState {
    /// Remote store used by the repositories.
    pub store: Arc<dyn RemoteStore>,
    /// Workspace composition over the same store.
    pub workspaces: WorkspaceService,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn RemoteStore>, config: ServerConfig) -> Self {
        Self {
            workspaces: WorkspaceService::new(Arc::clone(&store)),
            store,
            config: Arc::new(config),
        }
    }
}
