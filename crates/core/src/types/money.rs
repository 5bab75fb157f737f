//! Prices in Gambian dalasi.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Dalasi`] amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The input is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a number")]
    NotANumber,
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The amount does not fit a stored price.
    #[error("price cannot be more than {}", Dalasi::MAX)]
    TooLarge,
    /// More than two decimal places.
    #[error("price cannot have more than two decimal places")]
    TooPrecise,
}

/// An amount of money in dalasi (GMD).
///
/// Rendered with a `D` prefix and without trailing zeros, which is how
/// sellers and buyers write prices in chat:
///
/// ```
/// use sanndikaa_core::Dalasi;
///
/// assert_eq!(Dalasi::parse("150").unwrap().to_string(), "D150");
/// assert_eq!(Dalasi::parse("99.50").unwrap().to_string(), "D99.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dalasi(Decimal);

impl Dalasi {
    /// Zero dalasi.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest price a product, order or lead can store (`NUMERIC(12, 2)`).
    pub const MAX: Self = Self(Decimal::from_parts(3_567_587_327, 232, 0, false, 2));

    /// Decimal places a stored price keeps.
    pub const SCALE: u32 = 2;

    /// Wrap an already validated amount.
    ///
    /// Totals of stored prices go through here, since a sum may exceed
    /// [`Dalasi::MAX`].
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse a price typed into a form.
    ///
    /// Surrounding whitespace and a leading `D` are tolerated.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError`] for empty, non-numeric or negative input, and
    /// for amounts that do not fit a stored price.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let s = s.trim();
        let s = s.strip_prefix(['D', 'd']).unwrap_or(s).trim();
        if s.is_empty() {
            return Err(PriceError::Empty);
        }
        let amount = Decimal::from_str(s).map_err(|_| PriceError::NotANumber)?;
        Self::try_from(amount)
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The amount without the currency prefix (`"99.5"`).
    #[must_use]
    pub fn plain(&self) -> String {
        self.0.normalize().to_string()
    }

    /// Mean of a set of prices, rounded half away from zero to whole dalasi.
    ///
    /// Returns zero for an empty set.
    #[must_use]
    pub fn rounded_average(total: Self, count: i64) -> Self {
        if count <= 0 {
            return Self::ZERO;
        }
        Self(
            (total.0 / Decimal::from(count))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl TryFrom<Decimal> for Dalasi {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        if amount.normalize().scale() > Self::SCALE {
            return Err(PriceError::TooPrecise);
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge);
        }
        Ok(Self(amount))
    }
}

impl core::ops::Add for Dalasi {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl core::iter::Sum for Dalasi {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, d| acc + d)
    }
}

impl fmt::Display for Dalasi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0.normalize())
    }
}

impl FromStr for Dalasi {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Dalasi {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Dalasi {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Dalasi {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_form_input() {
        assert_eq!(Dalasi::parse("150").unwrap().amount(), Decimal::from(150));
        assert_eq!(
            Dalasi::parse(" 99.50 ").unwrap().amount(),
            Decimal::new(9950, 2)
        );
        assert_eq!(Dalasi::parse("D250").unwrap().amount(), Decimal::from(250));
        assert_eq!(Dalasi::parse("0").unwrap(), Dalasi::ZERO);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Dalasi::parse(""), Err(PriceError::Empty));
        assert_eq!(Dalasi::parse("D"), Err(PriceError::Empty));
        assert_eq!(Dalasi::parse("cheap"), Err(PriceError::NotANumber));
        assert_eq!(Dalasi::parse("-5"), Err(PriceError::Negative));
    }

    #[test]
    fn test_parse_enforces_stored_precision_and_range() {
        assert_eq!(Dalasi::MAX.amount(), Decimal::new(999_999_999_999, 2));
        assert_eq!(
            Dalasi::parse("9999999999.99").unwrap(),
            Dalasi::MAX
        );
        assert_eq!(Dalasi::parse("10000000000"), Err(PriceError::TooLarge));
        assert_eq!(Dalasi::parse("100000000000"), Err(PriceError::TooLarge));

        assert_eq!(Dalasi::parse("9.999"), Err(PriceError::TooPrecise));
        assert_eq!(Dalasi::parse("9.990").unwrap().to_string(), "D9.99");
        assert_eq!(
            Dalasi::try_from(Decimal::new(1, 3)),
            Err(PriceError::TooPrecise)
        );
    }

    #[test]
    fn test_display_drops_trailing_zeros() {
        assert_eq!(Dalasi::new(Decimal::new(15000, 2)).to_string(), "D150");
        assert_eq!(Dalasi::new(Decimal::new(9950, 2)).to_string(), "D99.5");
        assert_eq!(Dalasi::new(Decimal::new(1225, 2)).plain(), "12.25");
    }

    #[test]
    fn test_sum_and_average() {
        let prices = [
            Dalasi::parse("100").unwrap(),
            Dalasi::parse("250").unwrap(),
            Dalasi::parse("51").unwrap(),
        ];
        let total: Dalasi = prices.iter().copied().sum();
        assert_eq!(total.to_string(), "D401");
        assert_eq!(Dalasi::rounded_average(total, 3).to_string(), "D134");
        assert_eq!(Dalasi::rounded_average(Dalasi::ZERO, 0), Dalasi::ZERO);
    }
}
