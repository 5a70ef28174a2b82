//! Repository implementations for database access
//!
//! Every operation is a single parameterized statement.

pub mod employees;

pub use employees::{Employee, EmployeeRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
