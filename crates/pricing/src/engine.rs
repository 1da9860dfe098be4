use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sattva_core::{DiscountPercent, DomainError, DomainResult, Money, round2};

/// Final chargeable price.
///
/// `round2((base + variant_delta + energization_delta) * (1 - discount/100))`,
/// rounded once at the end and never per component. Deltas may carry any sign;
/// the base price and discount are validated by their types.
///
/// # Panics
///
/// If the pre-discount total leaves `Decimal`'s range (about `7.9e28`). Use
/// [`quote`] where the inputs are not known to be in range.
pub fn compute_final_price(
    base_price: Money,
    discount: DiscountPercent,
    variant_delta: Decimal,
    energization_delta: Decimal,
) -> Decimal {
    let pre_discount_total = base_price.amount() + variant_delta + energization_delta;
    round2(pre_discount_total * discount.factor())
}

/// Itemised price, for order summaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub base_price: Decimal,
    pub variant_delta: Decimal,
    pub energization_delta: Decimal,
    pub pre_discount_total: Decimal,
    pub discount_percent: Decimal,
    /// Amount knocked off by the discount, as displayed.
    pub savings: Decimal,
    pub final_price: Decimal,
}

fn out_of_range() -> DomainError {
    DomainError::precondition("price total is out of range")
}

/// Build a [`PriceQuote`]; `final_price` is exactly [`compute_final_price`] of the
/// same inputs.
///
/// Totals that overflow fail with a precondition error instead of panicking.
pub fn quote(
    base_price: Money,
    discount: DiscountPercent,
    variant_delta: Decimal,
    energization_delta: Decimal,
) -> DomainResult<PriceQuote> {
    let pre_discount_total = base_price
        .amount()
        .checked_add(variant_delta)
        .and_then(|total| total.checked_add(energization_delta))
        .ok_or_else(out_of_range)?;
    let final_price = round2(
        pre_discount_total
            .checked_mul(discount.factor())
            .ok_or_else(out_of_range)?,
    );
    let savings = round2(pre_discount_total)
        .checked_sub(final_price)
        .ok_or_else(out_of_range)?;

    Ok(PriceQuote {
        base_price: base_price.amount(),
        variant_delta,
        energization_delta,
        pre_discount_total,
        discount_percent: discount.percent(),
        savings,
        final_price,
    })
}
