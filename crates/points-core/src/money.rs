//! # Money Module
//!
//! Provides the `Money` type for handling receipt amounts exactly, and the
//! `Amount` type that scoring reads totals and prices through.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  "Is the total a multiple of 0.25?" in binary floating point:           │
//! │    0.30 is stored as 0.29999999999999998890                            │
//! │    fmod(x, 0.25) near an exact quarter can land on either side         │
//! │                                                                         │
//! │  OUR SOLUTION: Scaled Integers                                          │
//! │    "35.25"  → 3525 cents → 3525 % 25 == 0  (exact, always)             │
//! │    "12.250" → 1225 × 10^-2 (trailing zero dropped) → same as "12.25"   │
//! │    "12.25" × 20% rounded up → ceil(1225 × 2000 / 10^6) = 3             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Grammars
//! - [`Money`]: the strict `-?DIGITS(.D|.DD)?` form a well-formed receipt
//!   uses. Strict validation parses through it.
//! - [`Amount`]: any plain decimal (`"1.250"`, `".50"`, `"+3"`, `"5."`) at
//!   whatever precision it was written. Scoring parses through it so that
//!   an extra digit never turns a real amount into zero.
//!
//! ## Usage
//! ```rust
//! use points_core::money::{Amount, Money};
//!
//! // Receipts carry amounts as text; parse them straight into cents
//! let total: Money = "35.35".parse().unwrap();
//! assert_eq!(total.cents(), 3535);
//!
//! // There is no float constructor, on purpose
//! assert!("1e3".parse::<Money>().is_err());
//!
//! // Scoring keeps every digit it is given
//! let exact: Amount = "35.355".parse().unwrap();
//! assert!(exact.to_money().is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Basis points in one whole (100%).
const BPS_PER_WHOLE: i128 = 10_000;

/// Cents in one whole currency unit.
const CENTS_PER_UNIT: i64 = 100;

/// Fractional digits in a cent amount.
const CENT_DIGITS: u32 = 2;

/// Significant digits an [`Amount`] keeps; longer numbers do not parse.
const MAX_AMOUNT_DIGITS: usize = 18;

fn invalid_amount(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "amount".to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: A receipt may carry a negative price (a refund line);
///   it must still parse so strict validation can name the bad field
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use points_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / CENTS_PER_UNIT
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    ///
    /// ## Example
    /// ```rust
    /// use points_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents_part(), 99);
    /// assert_eq!(Money::from_cents(-550).cents_part(), 50); // Absolute value
    /// ```
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % CENTS_PER_UNIT).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// True when the amount is an exact multiple of `step`.
    ///
    /// A zero step divides nothing and always returns false.
    ///
    /// ## Example
    /// ```rust
    /// use points_core::money::Money;
    ///
    /// let quarter = Money::from_cents(25);
    /// assert!(Money::from_cents(3525).is_multiple_of(quarter));
    /// assert!(!Money::from_cents(3530).is_multiple_of(quarter));
    /// ```
    #[inline]
    pub const fn is_multiple_of(&self, step: Money) -> bool {
        step.0 != 0 && self.0 % step.0 == 0
    }

    /// Parses a decimal amount, labelling any error with `field`.
    ///
    /// ```rust
    /// use points_core::money::Money;
    ///
    /// let err = Money::parse_field("12.345", "total").unwrap_err();
    /// assert!(err.to_string().starts_with("total has invalid format"));
    /// ```
    pub fn parse_field(value: &str, field: &str) -> Result<Money, ValidationError> {
        value.parse::<Money>().map_err(|e| e.with_field(field))
    }
}

// =============================================================================
// Money Parsing
// =============================================================================

/// Parses `-?DIGITS(.D|.DD)?` into cents.
///
/// Exponents, a leading `+`, surrounding whitespace and more than two
/// fractional digits are all rejected rather than rounded.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(invalid_amount("empty amount"));
        }

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major, minor) = match unsigned.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (unsigned, None),
        };

        if major.is_empty() || !major.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid_amount("expected digits before the decimal point"));
        }

        let minor_cents = match minor {
            None => 0,
            Some(minor)
                if minor.is_empty()
                    || minor.len() > 2
                    || !minor.bytes().all(|b| b.is_ascii_digit()) =>
            {
                return Err(invalid_amount(
                    "expected one or two digits after the decimal point",
                ));
            }
            Some(minor) => {
                let value: i64 = minor.parse().map_err(|_| {
                    invalid_amount("expected one or two digits after the decimal point")
                })?;
                // "5.5" means 50 cents, not 5
                if minor.len() == 1 {
                    value * 10
                } else {
                    value
                }
            }
        };

        let cents = major
            .parse::<i64>()
            .ok()
            .and_then(|units| units.checked_mul(CENTS_PER_UNIT))
            .and_then(|cents| cents.checked_add(minor_cents))
            .ok_or_else(|| invalid_amount("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly rendering, e.g. `$12.25`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Amount Type
// =============================================================================

/// A decimal amount read at the precision it was written with.
///
/// Stored as `scaled × 10^-scale`. Trailing fractional zeros are dropped on
/// parse, so `"1.250"`, `"1.25"` and `"01.25"` are the same value and
/// `scale` counts only significant fractional digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Amount {
    scaled: i128,
    scale: u32,
}

impl Amount {
    /// Returns the zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Amount {
            scaled: 0,
            scale: 0,
        }
    }

    /// True when nothing follows the decimal point but zeros
    /// (`35`, `35.00`, `35.000`).
    #[inline]
    pub const fn is_whole_units(&self) -> bool {
        self.scale == 0
    }

    /// The amount in cents, or `None` when it carries sub-cent digits or
    /// does not fit.
    ///
    /// ```rust
    /// use points_core::money::{Amount, Money};
    ///
    /// let amount: Amount = "1.250".parse().unwrap();
    /// assert_eq!(amount.to_money(), Some(Money::from_cents(125)));
    /// assert_eq!("1.255".parse::<Amount>().unwrap().to_money(), None);
    /// ```
    pub fn to_money(&self) -> Option<Money> {
        let shift = CENT_DIGITS.checked_sub(self.scale)?;
        let cents = self.scaled.checked_mul(10_i128.pow(shift))?;
        i64::try_from(cents).ok().map(Money::from_cents)
    }

    /// True when the amount is an exact multiple of `step`.
    ///
    /// Sub-cent digits rule out every cent step.
    pub fn is_multiple_of(&self, step: Money) -> bool {
        self.to_money().is_some_and(|cents| cents.is_multiple_of(step))
    }

    /// Takes `rate_bps` of the amount and rounds the result UP to whole
    /// currency units.
    ///
    /// ## Implementation
    /// `ceil(scaled * bps / (10000 * 10^scale))` in i128. Rounding is toward
    /// positive infinity for negative amounts too (`-2.50` at 20% is `-0.5`,
    /// which rounds up to `0`).
    ///
    /// ## Example
    /// ```rust
    /// use points_core::money::Amount;
    ///
    /// let at_20 = |s: &str| s.parse::<Amount>().unwrap().ceil_units_at_rate(2000);
    /// // $12.25 × 20% = 2.45 → 3
    /// assert_eq!(at_20("12.25"), 3);
    /// // $12.00 × 20% = 2.40 → 3
    /// assert_eq!(at_20("12.00"), 3);
    /// // $10.00 × 20% = 2.00 → 2 (exact, no rounding)
    /// assert_eq!(at_20("10"), 2);
    /// // $10.001 × 20% = 2.0002 → 3
    /// assert_eq!(at_20("10.001"), 3);
    /// ```
    pub fn ceil_units_at_rate(&self, rate_bps: u32) -> i64 {
        let numerator = self.scaled * i128::from(rate_bps);
        let denominator = BPS_PER_WHOLE * 10_i128.pow(self.scale);
        // ceil(n / d) == -floor(-n / d)
        let units = -((-numerator).div_euclid(denominator));
        i64::try_from(units).unwrap_or(if units < 0 { i64::MIN } else { i64::MAX })
    }

    /// Parses a decimal amount, labelling any error with `field`.
    pub fn parse_field(value: &str, field: &str) -> Result<Amount, ValidationError> {
        value.parse::<Amount>().map_err(|e| e.with_field(field))
    }
}

/// Parses `[+-]?DIGITS*(.DIGITS*)?` with at least one digit.
///
/// A bare fraction (`".50"`) and a bare point (`"5."`) are accepted.
/// Exponents, whitespace and digit separators are not.
impl FromStr for Amount {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let (major, minor) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if major.is_empty() && minor.is_empty() {
            return Err(invalid_amount("expected at least one digit"));
        }
        if !major.bytes().chain(minor.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid_amount("expected a plain decimal number"));
        }

        let minor = minor.trim_end_matches('0');
        let digits = format!("{}{}", major, minor);
        let significant = digits.trim_start_matches('0');

        if significant.len() > MAX_AMOUNT_DIGITS || minor.len() > MAX_AMOUNT_DIGITS {
            return Err(invalid_amount("amount has too many digits"));
        }

        let magnitude: i128 = if significant.is_empty() {
            0
        } else {
            significant
                .parse()
                .map_err(|_| invalid_amount("expected a plain decimal number"))?
        };

        Ok(Amount {
            scaled: if negative { -magnitude } else { magnitude },
            scale: minor.len() as u32,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
