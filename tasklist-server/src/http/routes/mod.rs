//! Route handlers
//!
//! - index: root status and optional env debug
//! - health: database connectivity
//! - tasks: task CRUD

pub mod health;
pub mod index;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// All routes, unprefixed. The server mounts this at `/` and `/api`.
pub fn router(debug_routes: bool) -> Router<AppState> {
    Router::new()
        .merge(index::router(debug_routes))
        .merge(health::router())
        .merge(tasks::router())
}
