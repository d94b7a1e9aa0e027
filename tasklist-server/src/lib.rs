//! tasklist-server: HTTP service for a Postgres-backed task list
//!
//! The connection string is normalized by [`config`], turned into a single
//! shared pool by [`engine::EngineProvider`], and used per request by
//! [`db::TaskRepo`] behind the [`http`] router.

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod http;
pub mod models;
pub mod schema;
pub mod state;

pub use engine::{EngineProvider, PoolSettings};
pub use error::{ConfigError, StoreError, StoreResult};
pub use http::{ServerConfig, ServerError};
pub use state::AppState;

/// Prepare the database if possible, then serve until shutdown.
///
/// An unreachable or unconfigured database is logged and left for `/health`
/// to report; the server still starts.
pub async fn serve(engine: EngineProvider, config: ServerConfig) -> Result<(), ServerError> {
    match engine.handle() {
        Ok(pool) => {
            if let Err(e) = schema::ensure_schema(pool).await {
                tracing::warn!("Could not prepare task schema at startup: {}", e);
            }
        }
        Err(e) => tracing::warn!("Database not configured: {}", e),
    }

    let state = AppState::new(engine);
    http::run_server(state, config).await
}
