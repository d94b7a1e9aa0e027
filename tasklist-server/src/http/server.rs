//! Axum server setup
//!
//! Server skeleton with:
//! - Allow-list CORS by default
//! - Tracing middleware
//! - Every route served at `/` and under `/api`
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::error::ConfigError;
use crate::state::AppState;

/// Path prefix the routes are additionally served under
pub const API_PREFIX: &str = "/api";

/// Frontend origins allowed when nothing else is configured
pub const DEFAULT_CORS_ORIGINS: [&str; 3] = [
    "https://practice-with-react-uqap.vercel.app",
    "http://localhost:5173",
    "http://localhost:5174",
];

/// Which browser origins may call the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin. Logged as a warning when used.
    Permissive,
    /// Exact origins, with credentials allowed
    AllowList(Vec<String>),
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self::AllowList(DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect())
    }
}

impl CorsPolicy {
    /// Build the tower-http layer, validating every origin.
    pub fn layer(&self) -> Result<CorsLayer, ConfigError> {
        match self {
            Self::Permissive => {
                tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
                Ok(CorsLayer::permissive())
            }
            Self::AllowList(origins) => {
                let values = origins
                    .iter()
                    .map(|origin| {
                        let trimmed = origin.trim().trim_end_matches('/');
                        HeaderValue::from_str(trimmed).map_err(|_| {
                            ConfigError::InvalidCorsOrigin {
                                origin: origin.clone(),
                            }
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(CorsLayer::new()
                    .allow_origin(AllowOrigin::list(values))
                    .allow_methods(AllowMethods::mirror_request())
                    .allow_headers(AllowHeaders::mirror_request())
                    .allow_credentials(true))
            }
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8000)
    pub bind_addr: SocketAddr,

    pub cors: CorsPolicy,

    /// Mount `/debug`, which lists connection-related environment keys
    pub debug_routes: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            cors: CorsPolicy::default(),
            debug_routes: false,
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState, config: &ServerConfig) -> Result<Router, ConfigError> {
    let cors = config.cors.layer()?;
    let api = routes::router(config.debug_routes);

    Ok(Router::new()
        .merge(api.clone())
        .nest(API_PREFIX, api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(state: AppState, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(state, &config)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
