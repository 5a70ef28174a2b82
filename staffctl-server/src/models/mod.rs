//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod employee;
pub mod filter;
pub mod pagination;

pub use validation::ValidationError;
pub use employee::{
    parse_date, parse_variant, DocumentType, EmployeeDraft, EmployeeId, EmployeeStatus, Position,
    WorkCenter,
};
pub use filter::{EmployeeFilter, ListParams, REGISTERED};
pub use pagination::Pagination;
