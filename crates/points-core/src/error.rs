//! # Error Types
//!
//! Domain-specific error types for points-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  points-core errors (this file)                                        │
//! │  ├── CoreError        - Receipt document could not be accepted         │
//! │  └── ValidationError  - A single field failed its format check         │
//! │                                                                         │
//! │  points-store errors (separate crate)                                  │
//! │  └── StoreError       - Lookup / insert failures                       │
//! │                                                                         │
//! │  HTTP errors (in app)                                                  │
//! │  └── ApiError         - What the client sees (status + JSON body)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → ApiError → Client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Scoring itself never fails. These errors only come out of document
//! decoding and the opt-in strict validation pass.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while accepting a receipt document.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The request body is not a JSON document of the Receipt shape.
    ///
    /// ## When This Occurs
    /// - Body is not valid JSON
    /// - A required field is missing
    /// - A field has the wrong JSON type (e.g. `"items": "none"`)
    #[error("Malformed receipt: {0}")]
    MalformedInput(String),

    /// A field inside a well-formed receipt failed strict validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
///
/// Produced by [`crate::money::Money`] parsing and by
/// [`crate::validation::validate_receipt`]. Under the lenient policy the
/// scoring engine swallows these and falls back to a default value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (bad amount, bad date, bad time).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Amount must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },
}

impl ValidationError {
    /// Re-labels the error with a more specific field path.
    ///
    /// Money parsing only knows it was handed "an amount"; the caller
    /// knows it was `items[2].price`.
    pub fn with_field(self, field: impl Into<String>) -> Self {
        let field = field.into();
        match self {
            ValidationError::Required { .. } => ValidationError::Required { field },
            ValidationError::InvalidFormat { reason, .. } => {
                ValidationError::InvalidFormat { field, reason }
            }
            ValidationError::MustBeNonNegative { .. } => {
                ValidationError::MustBeNonNegative { field }
            }
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::MalformedInput("missing field `total`".to_string());
        assert_eq!(err.to_string(), "Malformed receipt: missing field `total`");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "retailer".to_string(),
        };
        assert_eq!(err.to_string(), "retailer is required");

        let err = ValidationError::InvalidFormat {
            field: "total".to_string(),
            reason: "expected a decimal amount".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "total has invalid format: expected a decimal amount"
        );
    }

    #[test]
    fn test_with_field_keeps_reason() {
        let err = ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: "empty".to_string(),
        }
        .with_field("items[1].price");

        assert_eq!(err.to_string(), "items[1].price has invalid format: empty");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "retailer".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
