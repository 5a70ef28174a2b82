//! Validation error types

use std::fmt;

/// Validation error for domain models and request parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// String doesn't match required format (e.g., date, integer)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Invalid enum variant
    InvalidVariant { field: &'static str, value: String },

    /// Numeric value below the allowed minimum
    OutOfRange { field: &'static str, min: i64 },

    /// Numeric value above the allowed maximum
    TooLarge { field: &'static str, max: i64 },

    /// Termination date precedes hire date
    DateOrder,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::OutOfRange { field, min } => {
                write!(f, "{} must be at least {}", field, min)
            }
            Self::TooLarge { field, max } => {
                write!(f, "{} must be at most {}", field, max)
            }
            Self::DateOrder => {
                write!(f, "fecha_retiro cannot be earlier than fecha_ingreso")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::OutOfRange {
            field: "limit",
            min: 1,
        };
        assert_eq!(err.to_string(), "limit must be at least 1");

        let err = ValidationError::TooLarge {
            field: "limit",
            max: 100,
        };
        assert_eq!(err.to_string(), "limit must be at most 100");

        let err = ValidationError::Empty {
            field: "fecha_ingreso",
        };
        assert_eq!(err.to_string(), "fecha_ingreso is required");
    }
}
