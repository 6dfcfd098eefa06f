//! # Domain Types
//!
//! Core domain types used throughout the points service.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Receipt      │   │      Item       │   │   ScoreRecord   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  retailer       │   │  short_descr.   │   │  id (ReceiptId) │       │
//! │  │  purchase_date  │◄──│  price (text)   │   │  points (u64)   │       │
//! │  │  purchase_time  │   └─────────────────┘   │  receipt        │       │
//! │  │  items[]        │                         │  processed_at   │       │
//! │  │  total (text)   │─────────────────────────►                 │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Text-First Fields
//! Amounts, dates and times arrive as JSON strings and are kept verbatim.
//! They are only interpreted when scoring or validating, so a receipt with
//! an odd-looking total is still accepted and stored as submitted.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Amount;
use crate::{DATE_FORMAT, DATE_LAYOUT, TIME_FORMAT, TIME_LAYOUTS};

// =============================================================================
// Receipt
// =============================================================================

/// A purchase receipt as submitted by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Retailer or store name.
    pub retailer: String,

    /// Purchase date, `YYYY-MM-DD`.
    pub purchase_date: String,

    /// Purchase time, 24-hour `HH:MM`.
    pub purchase_time: String,

    /// Line items in the order they appear on the receipt.
    pub items: Vec<Item>,

    /// Total amount paid, e.g. `"35.35"`.
    pub total: String,
}

impl Receipt {
    /// Decodes a receipt from a JSON request body.
    ///
    /// ## Errors
    /// [`CoreError::MalformedInput`] carrying serde's reason when the body
    /// is not JSON, a field is missing, or a field has the wrong type.
    /// Field *contents* are not checked here.
    ///
    /// ## Example
    /// ```rust
    /// use points_core::Receipt;
    ///
    /// let body = br#"{"retailer":"Target","purchaseDate":"2022-01-01",
    ///     "purchaseTime":"13:01","items":[],"total":"1.25"}"#;
    /// let receipt = Receipt::from_json(body).unwrap();
    /// assert_eq!(receipt.retailer, "Target");
    ///
    /// assert!(Receipt::from_json(b"{}").is_err());
    /// ```
    pub fn from_json(body: &[u8]) -> CoreResult<Receipt> {
        serde_json::from_slice(body).map_err(|e| CoreError::MalformedInput(e.to_string()))
    }

    /// Parses the total at full precision.
    pub fn total_amount(&self) -> Result<Amount, ValidationError> {
        Amount::parse_field(&self.total, "total")
    }

    /// Parses the purchase date.
    ///
    /// Month and day must be zero-padded: `2022-1-02` is rejected even
    /// though chrono alone would read it.
    pub fn purchase_date(&self) -> Result<NaiveDate, ValidationError> {
        let invalid = |detail: String| ValidationError::InvalidFormat {
            field: "purchaseDate".to_string(),
            reason: format!("expected YYYY-MM-DD ({})", detail),
        };

        if !matches_layout(&self.purchase_date, DATE_LAYOUT) {
            return Err(invalid("wrong shape".to_string()));
        }
        NaiveDate::parse_from_str(&self.purchase_date, DATE_FORMAT)
            .map_err(|e| invalid(e.to_string()))
    }

    /// Parses the purchase time. The hour may be one digit, the minute
    /// may not.
    pub fn purchase_time(&self) -> Result<NaiveTime, ValidationError> {
        let invalid = |detail: String| ValidationError::InvalidFormat {
            field: "purchaseTime".to_string(),
            reason: format!("expected HH:MM ({})", detail),
        };

        if !TIME_LAYOUTS
            .iter()
            .any(|layout| matches_layout(&self.purchase_time, layout))
        {
            return Err(invalid("wrong shape".to_string()));
        }
        NaiveTime::parse_from_str(&self.purchase_time, TIME_FORMAT)
            .map_err(|e| invalid(e.to_string()))
    }
}

/// True when `value` has an ASCII digit wherever `layout` has `9` and the
/// same byte everywhere else.
fn matches_layout(value: &str, layout: &str) -> bool {
    value.len() == layout.len()
        && value
            .bytes()
            .zip(layout.bytes())
            .all(|(v, l)| if l == b'9' { v.is_ascii_digit() } else { v == l })
}

// =============================================================================
// Item
// =============================================================================

/// One line on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Free-text description; may carry leading/trailing whitespace.
    pub short_description: String,

    /// Line price, e.g. `"6.49"`.
    pub price: String,
}

impl Item {
    /// Creates an item from borrowed text.
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Item {
            short_description: short_description.into(),
            price: price.into(),
        }
    }

    /// Description with surrounding whitespace removed.
    #[inline]
    pub fn trimmed_description(&self) -> &str {
        self.short_description.trim()
    }

    /// Parses the price at full precision.
    pub fn price_amount(&self) -> Result<Amount, ValidationError> {
        Amount::parse_field(&self.price, "price")
    }
}

// =============================================================================
// Receipt Identifier
// =============================================================================

/// Opaque identifier handed back by `process`.
///
/// ## Why UUID v4?
/// 122 random bits: globally unique without coordination, and nothing about
/// the receipt can be inferred from it. No ordering is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(Uuid);

impl ReceiptId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        ReceiptId(Uuid::new_v4())
    }
}

impl Default for ReceiptId {
    fn default() -> Self {
        ReceiptId::new()
    }
}

/// Canonical hyphenated lowercase form.
impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Accepts only the form [`fmt::Display`] produces. Ids are opaque to
/// clients, so `A46C…`, `{…}` and `urn:uuid:…` spellings of an issued id
/// are different ids.
impl FromStr for ReceiptId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must be a lowercase hyphenated UUID".to_string(),
        };

        let id = Uuid::parse_str(s).map(ReceiptId).map_err(|_| invalid())?;
        if id.to_string() != s {
            return Err(invalid());
        }
        Ok(id)
    }
}

// =============================================================================
// Score Record
// =============================================================================

/// A processed receipt: what the store holds per identifier.
///
/// Built once, fully, before insertion; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub id: ReceiptId,
    pub points: u64,
    pub receipt: Receipt,
    pub processed_at: DateTime<Utc>,
}

impl ScoreRecord {
    /// Creates a record stamped with the current time.
    pub fn new(id: ReceiptId, points: u64, receipt: Receipt) -> Self {
        ScoreRecord {
            id,
            points,
            receipt,
            processed_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
