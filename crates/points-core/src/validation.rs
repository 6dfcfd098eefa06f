//! # Validation Module
//!
//! Field-format validation for receipts, used when the service runs with
//! [`ValidationPolicy::Strict`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: JSON shape (serde)                 ALWAYS                    │
//! │  ├── Body is JSON, required fields present, right JSON types           │
//! │  └── Failure → MalformedInput                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Field formats (THIS MODULE)        STRICT POLICY ONLY        │
//! │  ├── Amounts parse as cents and are not negative                       │
//! │  ├── Date is YYYY-MM-DD, time is HH:MM                                 │
//! │  └── Failure → Validation                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Scoring (lenient): anything that slipped through defaults to zero     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use points_core::validation::{validate_amount, validate_retailer};
//!
//! assert!(validate_retailer("Target").is_ok());
//! assert!(validate_amount("1.25", "total").is_ok());
//! assert!(validate_amount("-1.25", "total").is_err());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Receipt;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Policy
// =============================================================================

/// How field-format problems inside a well-formed receipt are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Accept the receipt; bad amounts/dates/times score as zero values.
    #[default]
    Lenient,
    /// Reject the receipt with the first failing field.
    Strict,
}

impl ValidationPolicy {
    /// Maps the `strict` configuration flag to a policy.
    pub const fn from_strict_flag(strict: bool) -> Self {
        if strict {
            ValidationPolicy::Strict
        } else {
            ValidationPolicy::Lenient
        }
    }

    #[inline]
    pub const fn is_strict(&self) -> bool {
        matches!(self, ValidationPolicy::Strict)
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a retailer name.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_retailer(retailer: &str) -> ValidationResult<()> {
    if retailer.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "retailer".to_string(),
        });
    }

    Ok(())
}

/// Validates a decimal amount field and returns it in cents.
///
/// ## Rules
/// - Must parse as `DIGITS(.D|.DD)?`
/// - Must be non-negative (zero is allowed)
pub fn validate_amount(value: &str, field: &str) -> ValidationResult<Money> {
    let amount = Money::parse_field(value, field)?;

    if amount.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(amount)
}

/// Validates that the receipt has at least one line item.
pub fn validate_items_present(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Receipt Validator
// =============================================================================

/// Validates every field of a receipt, stopping at the first failure.
///
/// ## Check Order
/// ```text
/// retailer → purchaseDate → purchaseTime → total → items → items[N].price
/// ```
///
/// Descriptions are free text and are never rejected.
pub fn validate_receipt(receipt: &Receipt) -> ValidationResult<()> {
    validate_retailer(&receipt.retailer)?;
    receipt.purchase_date()?;
    receipt.purchase_time()?;
    validate_amount(&receipt.total, "total")?;
    validate_items_present(receipt.items.len())?;

    for (index, item) in receipt.items.iter().enumerate() {
        validate_amount(&item.price, &format!("items[{}].price", index))?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
