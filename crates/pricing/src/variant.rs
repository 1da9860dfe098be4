use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sattva_core::ValueObject;

/// A selectable option, size or certificate of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantOption {
    pub title: String,
    pub price_delta: Decimal,
    /// Units on hand; `None` when stock is not tracked for this variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl VariantOption {
    pub fn new(title: impl Into<String>, price_delta: Decimal) -> Self {
        Self {
            title: title.into(),
            price_delta,
            stock: None,
        }
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn is_in_stock(&self) -> bool {
        self.stock != Some(0)
    }
}

impl ValueObject for VariantOption {}
