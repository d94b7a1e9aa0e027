//! HTTP server command
//!
//! Runs the task API with routes served at `/` and `/api`.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

use tasklist_server::http::CorsPolicy;
use tasklist_server::{EngineProvider, PoolSettings, ServerConfig};

/// Database connection arguments, shared by commands that talk to Postgres
#[derive(Parser, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL (checked first)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Fallback database URL, used when --database-url is unset
    #[arg(long, env = "POSTGRES_URL", hide_env_values = true)]
    pub postgres_url: Option<String>,

    /// Maximum pooled connections
    #[arg(long, default_value = "5")]
    pub max_connections: u32,

    /// Seconds to wait for a pooled connection
    #[arg(long, default_value = "10")]
    pub acquire_timeout: u64,
}

impl DatabaseArgs {
    /// First non-empty connection string, in flag order.
    pub fn raw_url(&self) -> Option<String> {
        [&self.database_url, &self.postgres_url]
            .into_iter()
            .flatten()
            .find(|url| !url.trim().is_empty())
            .cloned()
    }

    pub fn engine(&self) -> EngineProvider {
        EngineProvider::new(
            self.raw_url(),
            PoolSettings {
                max_connections: self.max_connections,
                acquire_timeout: Duration::from_secs(self.acquire_timeout),
            },
        )
    }
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "TASKLIST_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub db: DatabaseArgs,

    /// Allowed CORS origins (comma-separated); defaults to the known frontends
    #[arg(long, env = "CORS_ALLOWED_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long, conflicts_with = "cors_origins")]
    pub cors_permissive: bool,

    /// Expose /debug with redacted connection settings
    #[arg(long)]
    pub debug_routes: bool,
}

impl ServeArgs {
    fn cors_policy(&self) -> CorsPolicy {
        if self.cors_permissive {
            CorsPolicy::Permissive
        } else if self.cors_origins.is_empty() {
            CorsPolicy::default()
        } else {
            CorsPolicy::AllowList(self.cors_origins.clone())
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind,
        cors: args.cors_policy(),
        debug_routes: args.debug_routes,
    };

    tracing::info!("Starting tasklist server on {}", args.bind);

    tasklist_server::serve(args.db.engine(), config)
        .await
        .context("Server error")?;

    Ok(())
}
