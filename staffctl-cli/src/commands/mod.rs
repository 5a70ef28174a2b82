//! Command implementations for staffctl CLI

pub mod migrate;
pub mod serve;

pub use migrate::run_migrate;
pub use serve::run_serve;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use staffctl_server::db::pool::{DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS};
use staffctl_server::db::{PgPool, PoolSettings};

/// Database connection options shared by every command
#[derive(Args, Debug, Clone)]
pub struct DatabaseArgs {
    /// Database URL (overrides .env)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled connections
    #[arg(
        long,
        env = "STAFFCTL_MAX_CONNECTIONS",
        default_value_t = DEFAULT_MAX_CONNECTIONS
    )]
    pub max_connections: u32,

    /// Seconds to wait for a free connection before failing a request
    #[arg(
        long,
        env = "STAFFCTL_ACQUIRE_TIMEOUT",
        default_value_t = DEFAULT_ACQUIRE_TIMEOUT_SECS
    )]
    pub acquire_timeout: u64,
}

impl DatabaseArgs {
    /// Connect the shared pool.
    pub async fn connect(&self) -> Result<PgPool> {
        let database_url = self
            .database_url
            .as_deref()
            .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

        staffctl_server::create_pool_with_settings(database_url, &self.pool_settings())
            .await
            .context("Failed to create database pool")
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout),
        }
    }
}
