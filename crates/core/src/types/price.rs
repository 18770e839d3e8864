//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are parsed from raw form text and validated before they are
//! stored. `SQLite` has no fixed-point column type, so a `Price` is persisted
//! as its canonical two-decimal string (see [`Price`]'s `Display`) and read
//! back with [`Price::parse`], which keeps `9.99` exactly `9.99`.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number, got {0:?}")]
    Invalid(String),
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount has more fractional digits than the currency allows.
    #[error("price must have at most {max} decimal places")]
    TooPrecise {
        /// Maximum allowed fractional digits.
        max: u32,
    },
    /// The amount exceeds [`Price::MAX`].
    #[error("price must be at most {max}")]
    TooLarge {
        /// Largest accepted amount.
        max: Decimal,
    },
}

/// A non-negative price in the store's single currency.
///
/// ## Examples
///
/// ```
/// use catalog_core::Price;
///
/// let price = Price::parse("9.99").unwrap();
/// assert_eq!(price.to_string(), "9.99");
/// assert_eq!(Price::parse("10").unwrap().to_string(), "10.00");
///
/// assert!(Price::parse("abc").is_err());
/// assert!(Price::parse("-1").is_err());
/// assert!(Price::parse("1.999").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Maximum number of fractional digits.
    pub const MAX_SCALE: u32 = 2;

    /// Largest accepted amount.
    ///
    /// Keeps every stored price well inside the range where the two-decimal
    /// text form parses back to the same value.
    // 999_999_999_999_999.99 (mantissa 99_999_999_999_999_999, scale 2).
    pub const MAX: Decimal = Decimal::from_parts(0x5D89_FFFF, 0x0163_4578, 0, false, 2);

    /// Parse a price from user-submitted text.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is not a decimal number, is
    /// negative, larger than [`Self::MAX`], or has more than
    /// [`Self::MAX_SCALE`] fractional digits.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str_exact(trimmed).map_err(|_| PriceError::Invalid(trimmed.to_owned()))?;

        Self::from_decimal(amount)
    }

    /// Create a price from an already-parsed decimal amount.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative, too large or too precise.
    pub fn from_decimal(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative);
        }

        if amount > Self::MAX {
            return Err(PriceError::TooLarge { max: Self::MAX });
        }

        // Trailing zeros ("1.50000") are not extra precision.
        if amount.normalize().scale() > Self::MAX_SCALE {
            return Err(PriceError::TooPrecise {
                max: Self::MAX_SCALE,
            });
        }

        Ok(Self(amount))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
