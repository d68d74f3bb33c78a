//! # Money Module
//!
//! The catalog sends prices as decimal strings (`"10.55"`) next to an ISO
//! currency code. This module keeps the wire record ([`Money`]) separate from
//! the number used for arithmetic ([`Amount`]).
//!
//! ## Why Fixed-Point?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: integer mantissa + decimal scale                        │
//! │    "10.55" → Amount { mantissa: 1055, scale: 2 }                       │
//! │    "0.125" → Amount { mantissa: 125,  scale: 3 }                       │
//! │                                                                         │
//! │  Sums and quantity products are exact. Rounding happens ONCE, when     │
//! │  the final total is formatted.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopfront_core::money::Amount;
//!
//! let unit = Amount::parse("10.55").unwrap();
//! let line = unit.checked_mul_quantity(3).unwrap();
//! assert_eq!(line.to_fixed(2), "31.65");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Largest number of fraction digits an amount may carry.
pub const MAX_SCALE: u32 = 18;

// =============================================================================
// Money (wire record)
// =============================================================================

/// A price as delivered by the catalog: decimal string plus currency code.
///
/// The currency code never takes part in arithmetic. Cart totals add raw
/// amounts, so a cart mixing currencies produces a meaningless sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Money {
    /// Base-10 decimal string, e.g. `"10.55"`.
    pub amount: String,

    /// ISO 4217 code, e.g. `"USD"`.
    pub currency_code: String,
}

impl Money {
    /// Creates a money record.
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Money {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Parses the amount string into a fixed-point [`Amount`].
    pub fn amount(&self) -> CoreResult<Amount> {
        Amount::parse(&self.amount)
    }
}

/// Formats as the product page shows a price: `"10.55 USD"`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

// =============================================================================
// Amount (fixed-point number)
// =============================================================================

/// An exact decimal number: `mantissa × 10^-scale`.
///
/// ## Design Decisions
/// - **i128 mantissa**: 18 fraction digits still leave ~20 integer digits
/// - **Scale kept from input**: `"10.5"` and `"10.50"` compare equal but keep
///   their own precision until they are combined
#[derive(Debug, Clone, Copy)]
pub struct Amount {
    mantissa: i128,
    scale: u32,
}

impl Amount {
    /// Zero with no fraction digits.
    #[inline]
    pub const fn zero() -> Self {
        Amount {
            mantissa: 0,
            scale: 0,
        }
    }

    /// Parses a base-10 decimal string.
    ///
    /// ## Accepted Forms
    /// ```text
    /// "10"  "10.5"  "10.50"  ".5"  "5."  "-3.25"  "+7"  "  4.00 "
    /// ```
    ///
    /// ## Rejected Forms
    /// ```text
    /// ""  "."  "abc"  "1e5"  "1.2.3"  "1,50"
    /// ```
    pub fn parse(input: &str) -> CoreResult<Self> {
        let trimmed = input.trim();

        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(CoreError::invalid_amount(input, "no digits"));
        }

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(CoreError::invalid_amount(input, "unexpected character"));
        }

        if frac_part.len() > MAX_SCALE as usize {
            return Err(CoreError::invalid_amount(
                input,
                format!("more than {} fraction digits", MAX_SCALE),
            ));
        }

        let mut mantissa: i128 = 0;
        for digit in int_part.bytes().chain(frac_part.bytes()) {
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|m| m.checked_add(i128::from(digit - b'0')))
                .ok_or(CoreError::AmountOverflow)?;
        }

        Ok(Amount {
            mantissa: if negative { -mantissa } else { mantissa },
            scale: frac_part.len() as u32,
        })
    }

    /// Number of fraction digits carried.
    #[inline]
    pub const fn scale(&self) -> u32 {
        self.scale
    }

    /// Re-expresses the value with more fraction digits.
    fn rescale(self, scale: u32) -> CoreResult<Self> {
        debug_assert!(scale >= self.scale);
        let mantissa = self
            .mantissa
            .checked_mul(pow10(scale - self.scale))
            .ok_or(CoreError::AmountOverflow)?;
        Ok(Amount { mantissa, scale })
    }

    /// Exact addition. The result carries the larger of the two scales.
    pub fn checked_add(self, other: Amount) -> CoreResult<Self> {
        let scale = self.scale.max(other.scale);
        let a = self.rescale(scale)?;
        let b = other.rescale(scale)?;
        let mantissa = a
            .mantissa
            .checked_add(b.mantissa)
            .ok_or(CoreError::AmountOverflow)?;
        Ok(Amount { mantissa, scale })
    }

    /// Exact multiplication by a line quantity.
    pub fn checked_mul_quantity(self, quantity: u32) -> CoreResult<Self> {
        let mantissa = self
            .mantissa
            .checked_mul(i128::from(quantity))
            .ok_or(CoreError::AmountOverflow)?;
        Ok(Amount {
            mantissa,
            scale: self.scale,
        })
    }

    /// Sums amounts exactly.
    pub fn try_sum<I>(amounts: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::zero(), |acc, amount| acc.checked_add(amount))
    }

    /// Formats with exactly `places` fraction digits.
    ///
    /// Extra digits are rounded half away from zero:
    /// ```text
    /// 0.125  → "0.13"
    /// -0.125 → "-0.13"
    /// 0.124  → "0.12"
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::money::Amount;
    ///
    /// assert_eq!(Amount::parse("30.555").unwrap().to_fixed(2), "30.56");
    /// assert_eq!(Amount::parse("7").unwrap().to_fixed(2), "7.00");
    /// ```
    pub fn to_fixed(&self, places: u32) -> String {
        let places = places.min(MAX_SCALE);

        // Work on the magnitude; i128::MIN cannot come out of parse/add/mul
        // without tripping an overflow check first.
        let magnitude = self.mantissa.unsigned_abs();

        let (units, frac) = if self.scale <= places {
            let divisor = pow10_u(self.scale);
            let frac = (magnitude % divisor) * pow10_u(places - self.scale);
            (magnitude / divisor, frac)
        } else {
            let drop = pow10_u(self.scale - places);
            let mut kept = magnitude / drop;
            if (magnitude % drop) * 2 >= drop {
                kept += 1;
            }
            let divisor = pow10_u(places);
            (kept / divisor, kept % divisor)
        };

        let sign = if self.mantissa < 0 && (units != 0 || frac != 0) {
            "-"
        } else {
            ""
        };

        if places == 0 {
            format!("{}{}", sign, units)
        } else {
            format!("{}{}.{:0width$}", sign, units, frac, width = places as usize)
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::zero()
    }
}

/// Values compare numerically: `10.5 == 10.50`.
impl PartialEq for Amount {
    fn eq(&self, other: &Self) -> bool {
        let scale = self.scale.max(other.scale);
        match (self.rescale(scale), other.rescale(scale)) {
            (Ok(a), Ok(b)) => a.mantissa == b.mantissa,
            _ => false,
        }
    }
}

impl Eq for Amount {}

/// Prints the value at its own scale.
impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed(self.scale))
    }
}

#[inline]
fn pow10(exp: u32) -> i128 {
    10_i128.pow(exp)
}

#[inline]
fn pow10_u(exp: u32) -> u128 {
    10_u128.pow(exp)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepted_forms() {
        assert_eq!(Amount::parse("10").unwrap().to_fixed(2), "10.00");
        assert_eq!(Amount::parse("10.5").unwrap().to_fixed(2), "10.50");
        assert_eq!(Amount::parse(".5").unwrap().to_fixed(2), "0.50");
        assert_eq!(Amount::parse("5.").unwrap().to_fixed(2), "5.00");
        assert_eq!(Amount::parse("-3.25").unwrap().to_fixed(2), "-3.25");
        assert_eq!(Amount::parse("+7").unwrap().to_fixed(0), "7");
        assert_eq!(Amount::parse("  4.00 ").unwrap().to_fixed(2), "4.00");
    }

    #[test]
    fn test_parse_rejected_forms() {
        for bad in ["", ".", "-", "abc", "1e5", "1.2.3", "1,50", "--1", "1 000"] {
            assert!(Amount::parse(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_parse_scale_limit() {
        let ok = format!("0.{}", "1".repeat(MAX_SCALE as usize));
        assert!(Amount::parse(&ok).is_ok());

        let too_long = format!("0.{}", "1".repeat(MAX_SCALE as usize + 1));
        assert!(matches!(
            Amount::parse(&too_long),
            Err(CoreError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_parse_overflow() {
        let huge = "9".repeat(60);
        assert_eq!(Amount::parse(&huge), Err(CoreError::AmountOverflow));
    }

    #[test]
    fn test_add_aligns_scales() {
        let a = Amount::parse("10.5").unwrap();
        let b = Amount::parse("0.055").unwrap();
        let sum = a.checked_add(b).unwrap();
        assert_eq!(sum.scale(), 3);
        assert_eq!(sum.to_string(), "10.555");
    }

    #[test]
    fn test_multiply_quantity() {
        let unit = Amount::parse("2.99").unwrap();
        assert_eq!(unit.checked_mul_quantity(3).unwrap().to_fixed(2), "8.97");
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(Amount::parse("0.125").unwrap().to_fixed(2), "0.13");
        assert_eq!(Amount::parse("-0.125").unwrap().to_fixed(2), "-0.13");
        assert_eq!(Amount::parse("0.124").unwrap().to_fixed(2), "0.12");
        assert_eq!(Amount::parse("0.995").unwrap().to_fixed(2), "1.00");
        assert_eq!(Amount::parse("-0.001").unwrap().to_fixed(2), "0.00");
    }

    /// Rounding applies to the final sum, not to each addend.
    #[test]
    fn test_no_intermediate_rounding() {
        let third = Amount::parse("0.005").unwrap();
        let sum = Amount::try_sum([third, third, third]).unwrap();
        // Per-line rounding would give 0.03; exact sum 0.015 rounds to 0.02.
        assert_eq!(sum.to_fixed(2), "0.02");
    }

    #[test]
    fn test_numeric_equality_ignores_scale() {
        assert_eq!(Amount::parse("10.5").unwrap(), Amount::parse("10.50").unwrap());
        assert_ne!(Amount::parse("10.5").unwrap(), Amount::parse("10.05").unwrap());
    }

    #[test]
    fn test_money_record() {
        let price = Money::new("10.55", "USD");
        assert_eq!(price.to_string(), "10.55 USD");
        assert_eq!(price.amount().unwrap().to_fixed(2), "10.55");

        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, r#"{"amount":"10.55","currencyCode":"USD"}"#);
    }
}
