//! # Money Module
//!
//! Amounts are whole cents in an `i64`.
//!
//! ## Cents In, Cents Out
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "7.25"  ──parse──►  Money(725)  ──× qty──►  Money(7250)                │
//! │                                                  │                      │
//! │                                 Σ over items / sales                   │
//! │                                                  │                      │
//! │                                  format_with("$") ──►  "$72.50"         │
//! │                                                                         │
//! │  Tier prices carry at most two decimals, so no step above rounds.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use wholesale_core::money::Money;
//!
//! let price: Money = "5.00".parse().unwrap();
//! assert_eq!(price.cents(), 500);
//!
//! let subtotal = price.multiply_quantity(10);
//! assert_eq!(subtotal.to_string(), "$50.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

/// An amount of money in cents.
///
/// Validation bounds quantities, prices and line counts so one sale always
/// totals exactly. Arithmetic saturates at the `i64` limits, which only a
/// sum over a very large number of maximal sales can reach.
///
/// ```text
/// LineItem.price_*_cents ──► applicable_price ──► × quantity ──► line subtotal
///                                                                    │
///                          sale_total ◄── Σ line subtotals ◄─────────┘
///                              │
///                              └──► CustomerGroup.total_amount (Σ sale totals)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// True for a tier price that is actually set.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Unit price times units sold.
    ///
    /// ```rust
    /// use wholesale_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(500).multiply_quantity(10).cents(), 5000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Two decimals behind `symbol`; the sign goes in front of the symbol.
    ///
    /// ```rust
    /// use wholesale_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(123456).format_with("€"), "€1234.56");
    /// assert_eq!(Money::from_cents(-5).format_with("$"), "-$0.05");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

/// Parses a decimal amount such as `"7"`, `"7.5"` or `"7.25"`.
///
/// An optional leading `-` is accepted. More than two decimal places is an
/// error rather than a rounding.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let raw = s.trim();
        let (negative, unsigned) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

        if whole.is_empty() {
            return Err(invalid("expected digits before the decimal point"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected a decimal number like 12.50"));
        }
        if fraction.len() > 2 {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let too_large = || invalid("amount is too large");
        let whole: i64 = whole.parse().map_err(|_| too_large())?;
        let minor: i64 = match fraction.len() {
            0 => 0,
            // "7.5" is 50 cents, not 5
            1 => fraction.parse::<i64>().map_err(|_| too_large())? * 10,
            _ => fraction.parse::<i64>().map_err(|_| too_large())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(too_large)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// `$` and two decimals. Rendering with a configured symbol goes through
/// [`Money::format_with`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Money::from_cents(5000).to_string(), "$50.00");
        assert_eq!(Money::from_cents(7).to_string(), "$0.07");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_cents(1999).format_with("S/ "), "S/ 19.99");
    }

    #[test]
    fn test_parse_decimal_amounts() {
        assert_eq!("7".parse::<Money>().unwrap().cents(), 700);
        assert_eq!("7.5".parse::<Money>().unwrap().cents(), 750);
        assert_eq!("7.25".parse::<Money>().unwrap().cents(), 725);
        assert_eq!(" 0.05 ".parse::<Money>().unwrap().cents(), 5);
        assert_eq!("-1.10".parse::<Money>().unwrap().cents(), -110);
        assert_eq!("12.".parse::<Money>().unwrap().cents(), 1200);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<Money>().is_err());
        assert!(".50".parse::<Money>().is_err());
        assert!("7.255".parse::<Money>().is_err());
        assert!("7,25".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());
    }

    #[test]
    fn test_line_math() {
        let unit = Money::from_cents(500);
        assert_eq!(unit.multiply_quantity(10), Money::from_cents(5000));
        assert_eq!(unit * 3, Money::from_cents(1500));

        let mut running = Money::ZERO;
        running += unit;
        assert_eq!(running + unit, Money::from_cents(1000));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(max + Money::from_cents(1), max);
        assert_eq!(Money::from_cents(100_000_000).multiply_quantity(100_000_000_000), max);

        let total: Money = [max, max, Money::from_cents(5)].into_iter().sum();
        assert_eq!(total, max);
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(2000), Money::from_cents(3000)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_cents(5000));

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
        assert!(!empty.is_positive());
    }
}
