//! # Error Types
//!
//! Domain-specific error types for wholesale-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  wholesale-core errors (this file)                                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  wholesale-db errors (separate crate)                                   │
//! │  └── DbError          - NotFound + storage failures                    │
//! │                                                                         │
//! │  CLI errors (in app)                                                    │
//! │  └── AppError         - What the terminal user sees                    │
//! │                                                                         │
//! │  Flow: ValidationError → DbError / AppError → stderr                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing and aggregation never produce errors: they are total over a
//! validated [`Sale`](crate::types::Sale).

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before anything reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A collection that needs at least one entry is empty.
    #[error("{field} must contain at least one entry")]
    Empty { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, invalid date, invalid amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Prefixes the field name with the position of the offending line item.
    ///
    /// `quantity` on the second item becomes `line_items[1].quantity`.
    pub fn at_line_item(self, index: usize) -> Self {
        let prefix = |field: String| format!("line_items[{}].{}", index, field);
        match self {
            ValidationError::Required { field } => ValidationError::Required {
                field: prefix(field),
            },
            ValidationError::Empty { field } => ValidationError::Empty {
                field: prefix(field),
            },
            ValidationError::TooLong { field, max } => ValidationError::TooLong {
                field: prefix(field),
                max,
            },
            ValidationError::OutOfRange { field, min, max } => ValidationError::OutOfRange {
                field: prefix(field),
                min,
                max,
            },
            ValidationError::MustBePositive { field } => ValidationError::MustBePositive {
                field: prefix(field),
            },
            ValidationError::InvalidFormat { field, reason } => ValidationError::InvalidFormat {
                field: prefix(field),
                reason,
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer_name".to_string(),
        };
        assert_eq!(err.to_string(), "customer_name is required");

        let err = ValidationError::Empty {
            field: "line_items".to_string(),
        };
        assert_eq!(err.to_string(), "line_items must contain at least one entry");
    }

    #[test]
    fn test_at_line_item_prefixes_field() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        }
        .at_line_item(1);
        assert_eq!(err.to_string(), "line_items[1].quantity must be positive");
    }
}
