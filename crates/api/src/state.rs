use std::sync::Arc;

use hostel_db::Stores;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Store handles for every collection.
    pub stores: Stores,
    pub config: Arc<ServerConfig>,
}
