//! Engine provider - one shared Postgres pool per process
//!
//! The provider is built once at startup and handed to request handlers via
//! router state. The pool itself is created on the first [`EngineProvider::handle`]
//! call and reused for the rest of the process lifetime.

use std::time::Duration;

use once_cell::sync::OnceCell;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::{connection_string_from_env, normalize_connection_string};
use crate::error::{ConfigError, StoreError};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time to wait for a pooled connection.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Pool sizing options
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

/// Lazily-initialized, memoized connection pool.
pub struct EngineProvider {
    raw_url: Option<String>,
    settings: PoolSettings,
    pool: OnceCell<PgPool>,
}

impl EngineProvider {
    /// Create a provider for the given raw connection string.
    ///
    /// Nothing is validated here; `None` surfaces as a [`ConfigError`] on the
    /// first [`handle`](Self::handle) call.
    pub fn new(raw_url: Option<String>, settings: PoolSettings) -> Self {
        Self {
            raw_url,
            settings,
            pool: OnceCell::new(),
        }
    }

    /// Create a provider reading `DATABASE_URL` / `POSTGRES_URL`.
    pub fn from_env(settings: PoolSettings) -> Self {
        Self::new(connection_string_from_env().ok(), settings)
    }

    /// Get the shared pool, building it on first use.
    ///
    /// Concurrent first calls race on the cell and exactly one pool is kept.
    /// A failed initialization is not cached, so a later call retries it.
    pub fn handle(&self) -> Result<&PgPool, ConfigError> {
        self.pool.get_or_try_init(|| self.build_pool())
    }

    /// Whether the pool has been built yet.
    pub fn is_initialized(&self) -> bool {
        self.pool.get().is_some()
    }

    /// Check connectivity with a round trip to the database.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let pool = self.handle()?;
        let mut conn = pool.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        Ok(())
    }

    fn build_pool(&self) -> Result<PgPool, ConfigError> {
        let raw = self
            .raw_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingConnectionString {
                names: crate::config::CONNECTION_ENV_VARS.join(", "),
            })?;

        let url = normalize_connection_string(raw)?;
        let options = url.parse::<PgConnectOptions>().map_err(|e| {
            ConfigError::InvalidConnectionString {
                reason: e.to_string(),
            }
        })?;

        tracing::info!(
            max_connections = self.settings.max_connections,
            "Database pool configured"
        );

        // connect_lazy_with performs no I/O; connections open on first acquire.
        Ok(PgPoolOptions::new()
            .max_connections(self.settings.max_connections)
            .acquire_timeout(self.settings.acquire_timeout)
            .test_before_acquire(true)
            .connect_lazy_with(options))
    }
}

impl std::fmt::Debug for EngineProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineProvider")
            .field("configured", &self.raw_url.is_some())
            .field("initialized", &self.is_initialized())
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::Barrier;

    #[tokio::test]
    async fn returns_same_pool_every_call() {
        let provider = EngineProvider::new(
            Some("postgres://user:pw@localhost:5432/tasks".into()),
            PoolSettings::default(),
        );
        assert!(!provider.is_initialized());

        let first = provider.handle().expect("pool");
        let second = provider.handle().expect("pool");

        assert!(std::ptr::eq(first, second));
        assert!(provider.is_initialized());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_calls_share_one_pool() {
        let provider = Arc::new(EngineProvider::new(
            Some("postgres://user:pw@localhost:5432/tasks".into()),
            PoolSettings::default(),
        ));
        let barrier = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let provider = provider.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    barrier.wait().await;
                    provider.handle().expect("pool") as *const PgPool as usize
                })
            })
            .collect();

        let expected = provider.handle().expect("pool") as *const PgPool as usize;
        for handle in handles {
            let addr = handle.await.expect("task panicked");
            assert_eq!(addr, expected);
        }
    }

    #[tokio::test]
    async fn missing_url_is_config_error() {
        let provider = EngineProvider::new(None, PoolSettings::default());

        let err = provider.handle().unwrap_err();
        assert!(matches!(err, ConfigError::MissingConnectionString { .. }));
        assert!(!provider.is_initialized());
    }

    #[tokio::test]
    async fn invalid_url_is_config_error() {
        let provider = EngineProvider::new(Some("not a url".into()), PoolSettings::default());

        let err = provider.handle().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConnectionString { .. }));
    }

    #[tokio::test]
    async fn ping_without_config_fails_fast() {
        let provider = EngineProvider::new(None, PoolSettings::default());

        let err = provider.ping().await.unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn ping_reaches_database() {
        let provider = EngineProvider::from_env(PoolSettings::default());
        provider.ping().await.expect("ping failed");
    }
}
