use std::sync::Arc;

use pethaven_db::PgStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: the pool inside the store is reference counted and the
/// config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Store adapter over the connection pool; services borrow it per request.
    pub store: PgStore,
    /// Immutable server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(pool: pethaven_db::DbPool, config: ServerConfig) -> Self {
        Self {
            store: PgStore::new(pool),
            config: Arc::new(config),
        }
    }
}
