//! Health check endpoint
//!
//! Reports live database connectivity. Never fails the request itself:
//! configuration and connection problems come back as `{"status": "error"}`.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub version: &'static str,
}

/// GET /health
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.engine().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "connected",
                detail: None,
                version: env!("CARGO_PKG_VERSION"),
            }),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "error",
                    detail: Some(e.to_string()),
                    version: env!("CARGO_PKG_VERSION"),
                }),
            )
        }
    }
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineProvider, PoolSettings};

    #[tokio::test]
    async fn unconfigured_engine_reports_error() {
        let state = AppState::new(EngineProvider::new(None, PoolSettings::default()));

        let (status, Json(body)) = health(State(state)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body.status, "error");
        assert!(body.detail.unwrap().contains("DATABASE_URL"));
    }
}
