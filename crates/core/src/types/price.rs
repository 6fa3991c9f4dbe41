//! Type-safe price representation using decimal arithmetic.
//!
//! All prices in Cortado are USD. The wrapper exists so that money never
//! flows through `f64` and so line/total math lives in one place.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price in USD, backed by [`Decimal`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero dollars.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount in dollars.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The amount in dollars.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Line total for `quantity` units of this price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Whole dollars, rounded down. Used for loyalty point accrual.
    #[must_use]
    pub fn whole_dollars(&self) -> i64 {
        self.0.trunc().try_into().unwrap_or(0)
    }

    /// Format for display (e.g., "$4.50").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

// SQLx support (with postgres feature): stored as NUMERIC
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
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
    fn test_from_cents() {
        assert_eq!(Price::from_cents(450).display(), "$4.50");
        assert_eq!(Price::from_cents(5).display(), "$0.05");
    }

    #[test]
    fn test_times() {
        let price = Price::from_cents(325);
        assert_eq!(price.times(3).display(), "$9.75");
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(450), Price::from_cents(375)]
            .into_iter()
            .sum();
        assert_eq!(total.display(), "$8.25");
    }

    #[test]
    fn test_whole_dollars_rounds_down() {
        assert_eq!(Price::from_cents(1299).whole_dollars(), 12);
        assert_eq!(Price::from_cents(99).whole_dollars(), 0);
        assert_eq!(Price::ZERO.whole_dollars(), 0);
    }

    #[test]
    fn test_serde_transparent() {
        let price = Price::from_cents(450);
        let json = serde_json::to_string(&price).unwrap();
        // rust_decimal serde-with-str serializes as a string
        assert_eq!(json, "\"4.50\"");
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }
}
