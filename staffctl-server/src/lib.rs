//! staffctl-server: HTTP backend for employee records
//!
//! Lists, filters, paginates, creates, updates, toggles and deletes
//! employee records stored in a single PostgreSQL table, and exports
//! filtered listings as CSV.
//!
//! - [`db`]: connection pool, schema bootstrap, filtered query builder, repository
//! - [`models`]: validated domain values (ids, enumerations, dates, filters, pagination)
//! - [`http`]: axum router, handlers, extractors and error mapping

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_lazy_pool, create_pool, create_pool_with_settings, DbError, PoolSettings};
pub use http::{run_server, ApiError, ServerConfig};
