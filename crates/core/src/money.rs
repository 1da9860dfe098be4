//! Monetary value objects.
//!
//! Amounts are exact decimals (`rust_decimal`), never binary floats, so the
//! total shown at checkout is bit-for-bit the total charged.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Number of decimal places prices are rounded to.
pub const PRICE_SCALE: u32 = 2;

/// Round to two decimal places, half-up (ties go toward positive infinity).
///
/// `99.995 -> 100.00`, `10.004 -> 10.00`, `-0.005 -> 0.00`, `-0.015 -> -0.01`.
pub fn round2(value: Decimal) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(PRICE_SCALE, strategy)
}

/// A non-negative amount in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::precondition(format!(
                "price must be non-negative, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl ValueObject for Money {}

impl TryFrom<Decimal> for Money {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A discount percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    pub const NONE: DiscountPercent = DiscountPercent(Decimal::ZERO);

    pub fn new(percent: Decimal) -> DomainResult<Self> {
        if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
            return Err(DomainError::precondition(format!(
                "discount must be within 0..=100, got {percent}"
            )));
        }
        Ok(Self(percent))
    }

    pub fn percent(&self) -> Decimal {
        self.0
    }

    /// Multiplier applied to a pre-discount total (`1 - percent/100`).
    pub fn factor(&self) -> Decimal {
        Decimal::ONE - self.0 / Decimal::ONE_HUNDRED
    }
}

impl Default for DiscountPercent {
    fn default() -> Self {
        Self::NONE
    }
}

impl ValueObject for DiscountPercent {}

impl TryFrom<Decimal> for DiscountPercent {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        DiscountPercent::new(value)
    }
}

impl From<DiscountPercent> for Decimal {
    fn from(value: DiscountPercent) -> Self {
        value.0
    }
}
