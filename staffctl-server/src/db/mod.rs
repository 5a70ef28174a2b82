//! Database layer - connection pool, schema bootstrap, query builder and repository
//!
//! # Design Principles
//!
//! - One connection pool per process, passed to handlers through state
//! - Every value is a bound parameter; SQL text holds placeholders only
//! - Single-statement writes with `RETURNING`, no check-then-act

pub mod migrations;
pub mod pool;
pub mod query;
pub mod repos;

pub use pool::{create_lazy_pool, create_pool, create_pool_with_settings, PoolSettings};
pub use query::{EmployeeQuery, SqlArg};
pub use repos::*;
pub use sqlx::PgPool;
