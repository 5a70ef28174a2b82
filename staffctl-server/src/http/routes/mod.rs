//! Route handlers organized by resource

pub mod employees;
pub mod export;
pub mod health;
