//! # Scoring Engine
//!
//! Turns a [`Receipt`] into a loyalty-points total.
//!
//! ## The Seven Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rule                     Field            Points                       │
//! │  ──────────────────────   ──────────────   ────────────────────────     │
//! │  1 Retailer characters    retailer         +1 per ASCII letter/digit    │
//! │  2 Round total            total            +50 if no fractional part    │
//! │  3 Quarter total          total            +25 if a multiple of 0.25    │
//! │  4 Item pairs             items.len()      +5 per two items             │
//! │  5 Description length     items[]          ceil(price × 20%) when the   │
//! │                                            trimmed length % 3 == 0      │
//! │  6 Odd day                purchaseDate     +6 if day is odd             │
//! │  7 Afternoon              purchaseTime     +10 if 14:00 <= t < 16:00    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rule is independent; the total is the plain sum.
//!
//! ## Lenient Field Handling
//! Scoring never fails. Amounts are read at full precision (`"1.250"` is
//! `1.25`, `".50"` is `0.50`). A field that does not parse at all takes a
//! fallback value:
//!
//! | Field          | Fallback       | Effect                             |
//! |----------------|----------------|------------------------------------|
//! | total          | `0.00`         | rules 2 and 3 both fire (+75)      |
//! | item price     | `0.00`         | rule 5 adds 0 for that item        |
//! | purchaseDate   | `0001-01-01`   | day 1 is odd, rule 6 fires (+6)    |
//! | purchaseTime   | `00:00`        | rule 7 does not fire               |
//!
//! Run the service with the strict policy to reject such receipts up front.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::money::{Amount, Money};
use crate::types::{Item, Receipt};

// =============================================================================
// Rule Constants
// =============================================================================

/// Rule 2 bonus.
pub const ROUND_TOTAL_POINTS: u64 = 50;

/// Rule 3 bonus.
pub const QUARTER_TOTAL_POINTS: u64 = 25;

/// Rule 3 step: 25 cents.
pub const QUARTER: Money = Money::from_cents(25);

/// Rule 4 bonus per pair of items.
pub const ITEM_PAIR_POINTS: u64 = 5;

/// Rule 5 applies when the trimmed description length is a multiple of this.
pub const DESCRIPTION_LENGTH_MULTIPLE: usize = 3;

/// Rule 5 share of the item price, in basis points (20%).
pub const DESCRIPTION_BONUS_RATE_BPS: u32 = 2000;

/// Rule 6 bonus.
pub const ODD_DAY_POINTS: u64 = 6;

/// Rule 7 bonus.
pub const AFTERNOON_POINTS: u64 = 10;

/// Rule 7 window, start inclusive.
const AFTERNOON_START_HOUR: u32 = 14;

/// Rule 7 window, end exclusive.
const AFTERNOON_END_HOUR: u32 = 16;

// =============================================================================
// Breakdown
// =============================================================================

/// Points contributed by each rule for one receipt.
///
/// Mostly useful for logging ("why did this score 28?") and for tests that
/// pin a single rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointsBreakdown {
    pub retailer: u64,
    pub round_total: u64,
    pub quarter_total: u64,
    pub item_pairs: u64,
    pub descriptions: u64,
    pub odd_day: u64,
    pub afternoon: u64,
}

impl PointsBreakdown {
    /// Sum of all seven rules, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.retailer
            .saturating_add(self.round_total)
            .saturating_add(self.quarter_total)
            .saturating_add(self.item_pairs)
            .saturating_add(self.descriptions)
            .saturating_add(self.odd_day)
            .saturating_add(self.afternoon)
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Computes the points total for a receipt.
///
/// ## Example
/// ```rust
/// use points_core::{compute_points, Item, Receipt};
///
/// let receipt = Receipt {
///     retailer: "M&M Corner Market".to_string(),
///     purchase_date: "2022-03-20".to_string(),
///     purchase_time: "14:33".to_string(),
///     items: vec![
///         Item::new("Gatorade", "2.25"),
///         Item::new("Gatorade", "2.25"),
///         Item::new("Gatorade", "2.25"),
///         Item::new("Gatorade", "2.25"),
///     ],
///     total: "9.00".to_string(),
/// };
///
/// // 14 + 50 + 25 + 10 + 0 + 0 + 10
/// assert_eq!(compute_points(&receipt), 109);
/// ```
pub fn compute_points(receipt: &Receipt) -> u64 {
    points_breakdown(receipt).total()
}

/// Evaluates each rule separately.
pub fn points_breakdown(receipt: &Receipt) -> PointsBreakdown {
    let total = receipt.total_amount().unwrap_or_default();

    PointsBreakdown {
        retailer: retailer_points(&receipt.retailer),
        round_total: round_total_points(total),
        quarter_total: quarter_total_points(total),
        item_pairs: item_pair_points(receipt.items.len()),
        descriptions: receipt
            .items
            .iter()
            .map(description_points)
            .fold(0, u64::saturating_add),
        // An unreadable date falls back to day 1, which is odd
        odd_day: receipt.purchase_date().map_or(ODD_DAY_POINTS, odd_day_points),
        // ...and an unreadable time to midnight
        afternoon: receipt.purchase_time().map_or(0, afternoon_points),
    }
}

// =============================================================================
// Rules
// =============================================================================

/// Rule 1: one point per ASCII letter or digit.
///
/// Unicode letters (`é`, `ß`) do not count; neither do spaces or `&`.
pub fn retailer_points(retailer: &str) -> u64 {
    retailer.chars().filter(char::is_ascii_alphanumeric).count() as u64
}

/// Rule 2: total has no fractional part.
pub fn round_total_points(total: Amount) -> u64 {
    if total.is_whole_units() {
        ROUND_TOTAL_POINTS
    } else {
        0
    }
}

/// Rule 3: total is a multiple of 0.25.
pub fn quarter_total_points(total: Amount) -> u64 {
    if total.is_multiple_of(QUARTER) {
        QUARTER_TOTAL_POINTS
    } else {
        0
    }
}

/// Rule 4: five points for every two items.
pub fn item_pair_points(item_count: usize) -> u64 {
    (item_count / 2) as u64 * ITEM_PAIR_POINTS
}

/// Rule 5: `ceil(price × 0.2)` for items whose trimmed description length
/// is a multiple of three.
///
/// Length is counted in characters. An empty description has length zero
/// and qualifies. A negative price never takes points away.
pub fn description_points(item: &Item) -> u64 {
    let length = item.trimmed_description().chars().count();
    if length % DESCRIPTION_LENGTH_MULTIPLE != 0 {
        return 0;
    }

    let price = item.price_amount().unwrap_or_default();
    price.ceil_units_at_rate(DESCRIPTION_BONUS_RATE_BPS).max(0) as u64
}

/// Rule 6: purchase day-of-month is odd.
pub fn odd_day_points(date: NaiveDate) -> u64 {
    if date.day() % 2 == 1 {
        ODD_DAY_POINTS
    } else {
        0
    }
}

/// Rule 7: purchased from 14:00 up to, but not including, 16:00.
///
/// ```rust
/// use chrono::NaiveTime;
/// use points_core::scoring::afternoon_points;
///
/// let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// assert_eq!(afternoon_points(at(13, 59)), 0);
/// assert_eq!(afternoon_points(at(14, 0)), 10);
/// assert_eq!(afternoon_points(at(15, 59)), 10);
/// assert_eq!(afternoon_points(at(16, 0)), 0);
/// ```
pub fn afternoon_points(time: NaiveTime) -> u64 {
    let hour = time.hour();
    if (AFTERNOON_START_HOUR..AFTERNOON_END_HOUR).contains(&hour) {
        AFTERNOON_POINTS
    } else {
        0
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
