//! # points-core: Pure Scoring Logic
//!
//! This crate is the **heart** of the receipt points service. It holds the
//! receipt types and the scoring rules as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Receipt Points Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    points-api (axum)                            │   │
//! │  │    POST /receipts/process      GET /receipts/{id}/points        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    points-store                                 │   │
//! │  │    ReceiptService::process / lookup, MemoryStore                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ points-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  scoring  │  │ validation│  │   │
//! │  │   │  Receipt  │  │   Money   │  │  7 rules  │  │  strict   │  │   │
//! │  │   │   Item    │  │  (cents)  │  │ breakdown │  │  policy   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO SHARED STATE • PURE FUNCTIONS                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Receipt, Item, ReceiptId, ScoreRecord
//! - [`money`] - Money and Amount, integer arithmetic only (no floating point!)
//! - [`scoring`] - The seven scoring rules
//! - [`validation`] - Strict field validation and the policy switch
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use points_core::{compute_points, Receipt};
//!
//! let body = br#"{
//!     "retailer": "Walgreens",
//!     "purchaseDate": "2022-01-02",
//!     "purchaseTime": "08:13",
//!     "total": "2.65",
//!     "items": [
//!         {"shortDescription": "Pepsi - 12-oz", "price": "1.25"},
//!         {"shortDescription": "Dasani", "price": "1.40"}
//!     ]
//! }"#;
//!
//! let receipt = Receipt::from_json(body).unwrap();
//! // 9 retailer + 5 for the pair + 1 for "Dasani" (6 chars, ceil(0.28))
//! assert_eq!(compute_points(&receipt), 15);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod scoring;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Amount, Money};
pub use scoring::{compute_points, points_breakdown, PointsBreakdown};
pub use types::*;
pub use validation::{validate_receipt, ValidationPolicy};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// `purchaseDate` format (chrono strftime syntax).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `purchaseTime` format: 24-hour clock, minutes, no seconds.
pub const TIME_FORMAT: &str = "%H:%M";

/// Required shape of `purchaseDate`; `9` stands for any digit.
pub const DATE_LAYOUT: &str = "9999-99-99";

/// Accepted shapes of `purchaseTime`.
pub const TIME_LAYOUTS: [&str; 2] = ["99:99", "9:99"];
