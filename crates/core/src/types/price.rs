//! Whole-peso price representation.
//!
//! Catalog prices are non-negative integers in the shop currency (Philippine
//! peso). Product controls carry prices as attribute strings, so parsing is
//! deliberately lenient: anything that does not start with a number becomes
//! a zero price instead of an error.

use core::fmt;
use core::iter::Sum;

use serde::{Deserialize, Serialize};

/// A price in whole pesos.
///
/// ```
/// use coffeehub_core::Price;
///
/// assert_eq!(Price::parse_lenient("120"), Price::new(120));
/// assert_eq!(Price::parse_lenient("120.75"), Price::new(120));
/// assert_eq!(Price::parse_lenient("free"), Price::ZERO);
/// assert_eq!(Price::new(120).to_string(), "₱120");
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// Currency symbol used when displaying prices.
    pub const SYMBOL: &'static str = "₱";

    /// The zero price, also the fallback for unparsable input.
    pub const ZERO: Self = Self(0);

    /// Create a price from a whole-peso amount.
    #[must_use]
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Returns the whole-peso amount.
    #[must_use]
    pub const fn amount(&self) -> u64 {
        self.0
    }

    /// Parse a price attribute the way `parseInt` reads it.
    ///
    /// Leading whitespace is skipped, an optional sign is accepted, and the
    /// leading run of ASCII digits is taken; the rest is ignored. Input with
    /// no leading digits, a negative amount, or an amount that overflows
    /// `u64` yields [`Price::ZERO`].
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let (negative, rest) = trimmed.strip_prefix('-').map_or_else(
            || (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
            |rest| (true, rest),
        );

        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (digits, _) = rest.split_at(digits_end);

        if digits.is_empty() {
            return Self::ZERO;
        }

        match digits.parse::<u64>() {
            Ok(amount) if !negative => Self(amount),
            _ => Self::ZERO,
        }
    }

    /// Price of `quantity` units, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::SYMBOL, self.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, price| Self(acc.0.saturating_add(price.0)))
    }
}

impl From<u64> for Price {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}
