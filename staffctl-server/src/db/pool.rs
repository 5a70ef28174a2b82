//! Connection Provider
//!
//! One `PgPool` is created at startup and shared by every request handler.
//! Pool size and acquire timeout come from [`PoolSettings`] so the CLI can
//! tune them; tests build a lazy pool that never dials until first use.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default time a request waits for a free connection, in seconds.
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Pool sizing and timeouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// How long `acquire` waits before failing with `PoolTimedOut`
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

impl PoolSettings {
    fn options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections.max(1))
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Connect a pool with default settings.
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/gestion_empleados").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_settings(database_url, &PoolSettings::default()).await
}

/// Connect a pool, failing fast if the database cannot be reached.
pub async fn create_pool_with_settings(
    database_url: &str,
    settings: &PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(
        max_connections = settings.max_connections,
        acquire_timeout_ms = settings.acquire_timeout.as_millis() as u64,
        "Connecting database pool"
    );
    settings.options().connect(database_url).await
}

/// Build a pool that opens connections on first use.
///
/// Only the URL is checked here; an unreachable server surfaces later as an
/// acquire error.
pub fn create_lazy_pool(database_url: &str, settings: &PoolSettings) -> Result<PgPool, sqlx::Error> {
    settings.options().connect_lazy(database_url)
}
