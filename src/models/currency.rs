//! Currency type for representing monetary amounts
//!
//! Internally stores amounts in cents (i64) so that totals never pick up
//! floating-point drift. Decimal input goes through `rust_decimal`, which keeps
//! the conversion to cents exact as well.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// Glyph used by [`Currency`]'s `Display` implementation
pub const DEFAULT_SYMBOL: &str = "€";

/// A monetary amount stored as cents (hundredths of the major unit)
///
/// Non-negative amounts are incomes, negative amounts are expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(i64);

impl Currency {
    /// Convert a major-unit decimal (e.g. euros) to cents
    ///
    /// Amounts with more than two fractional digits are rounded to the nearest
    /// cent, with halves rounded away from zero: `0.005` becomes one cent and
    /// `-0.005` becomes minus one cent. Values outside the `i64` cent range
    /// saturate; use [`Currency::checked_new`] where that must be an error.
    ///
    /// # Examples
    /// ```
    /// use budget::models::Currency;
    /// use rust_decimal::Decimal;
    ///
    /// let amount = Currency::new(Decimal::new(1050, 2)); // 10.50
    /// assert_eq!(amount.cents(), 1050);
    /// ```
    pub fn new(amount: Decimal) -> Self {
        Self::checked_new(amount).unwrap_or(if amount.is_sign_negative() {
            Self(i64::MIN)
        } else {
            Self(i64::MAX)
        })
    }

    /// Convert a major-unit decimal to cents, or `None` if it does not fit
    pub fn checked_new(amount: Decimal) -> Option<Self> {
        amount
            .checked_mul(Decimal::from(100))?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .map(Self)
    }

    /// Create a Currency amount from cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole major units (truncated toward zero)
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative, i.e. an expense
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Check if the amount counts as income (zero included)
    pub const fn is_income(&self) -> bool {
        self.0 >= 0
    }

    /// Add two amounts, or `None` if the sum leaves the `i64` cent range
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Parse a plain decimal numeral in major units
    ///
    /// Accepts an optional sign, digits and at most one decimal point ("10",
    /// "-10.5", "0.125"); extra fractional digits are rounded the same way as
    /// [`Currency::new`]. Amounts that do not fit in cents are rejected.
    pub fn parse(s: &str) -> Result<Self, CurrencyParseError> {
        let s = s.trim();
        if !is_plain_numeral(s) {
            return Err(CurrencyParseError::InvalidFormat(s.to_string()));
        }

        let amount = Decimal::from_str(s)
            .map_err(|_| CurrencyParseError::InvalidFormat(s.to_string()))?;
        Self::checked_new(amount).ok_or_else(|| CurrencyParseError::OutOfRange(s.to_string()))
    }

    /// Format with a currency symbol, e.g. `-€12.34`
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.major().abs(),
            self.cents_part()
        )
    }

    /// Format as a plain two-decimal numeral without a symbol, e.g. `-12.34`
    pub fn to_plain_string(&self) -> String {
        self.format_with_symbol("")
    }

    /// This amount as a percentage of `total`, or zero when `total` is zero
    ///
    /// A zero amount is always `0.0`, never `-0.0`.
    pub fn percentage_of(&self, total: Currency) -> f64 {
        if self.is_zero() || total.is_zero() {
            0.0
        } else {
            100.0 * self.0 as f64 / total.0 as f64
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_SYMBOL))
    }
}

impl FromStr for Currency {
    type Err = CurrencyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Currency {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Currency {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Sign, digits and an optional fractional part, with at least one digit
fn is_plain_numeral(s: &str) -> bool {
    let unsigned = s.strip_prefix(|c: char| c == '-' || c == '+').unwrap_or(s);
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    !(whole.is_empty() && fraction.is_empty())
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.chars().all(|c| c.is_ascii_digit())
}

impl std::iter::Sum for Currency {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Currency::zero(), |acc, c| acc + c)
    }
}

/// Error type for currency parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for CurrencyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurrencyParseError::InvalidFormat(s) => write!(f, "invalid amount '{}'", s),
            CurrencyParseError::OutOfRange(s) => write!(f, "amount '{}' is out of range", s),
        }
    }
}

impl std::error::Error for CurrencyParseError {}
