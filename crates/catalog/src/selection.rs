//! Checkout selections and the quote they produce.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sattva_core::{DomainError, DomainResult};
use sattva_pricing::{EnergizationForm, EnergizationSelection, PriceQuote, VariantOption, quote};

use crate::item::{CatalogItem, CatalogKind};

/// What the shopper picked on a product page, by title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selection {
    /// Rudraksha option.
    pub option: Option<String>,
    /// Bracelet size.
    pub size: Option<String>,
    /// Bracelet certificate.
    pub certificate: Option<String>,
    /// Energization add-on.
    pub energization: Option<String>,
    pub form_data: Option<EnergizationForm>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn option(title: impl Into<String>) -> Self {
        Self {
            option: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, title: impl Into<String>) -> Self {
        self.size = Some(title.into());
        self
    }

    pub fn with_certificate(mut self, title: impl Into<String>) -> Self {
        self.certificate = Some(title.into());
        self
    }

    pub fn with_energization(
        mut self,
        title: impl Into<String>,
        form_data: Option<EnergizationForm>,
    ) -> Self {
        self.energization = Some(title.into());
        self.form_data = form_data;
        self
    }
}

/// A fully resolved selection and its price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    /// Titles of the chosen variants, in option/size/certificate order.
    pub variants: Vec<String>,
    pub energization: Option<EnergizationSelection>,
    pub price: PriceQuote,
}

impl CheckoutQuote {
    pub fn final_price(&self) -> Decimal {
        self.price.final_price
    }
}

fn pick<'a>(
    field: &'static str,
    choices: &'a [VariantOption],
    title: &str,
) -> DomainResult<&'a VariantOption> {
    let choice = choices
        .iter()
        .find(|c| c.title == title)
        .ok_or_else(|| DomainError::invalid_enum(field, title))?;
    if !choice.is_in_stock() {
        return Err(DomainError::conflict(format!("{field} {title:?} is out of stock")));
    }
    Ok(choice)
}

fn reject(field: &'static str, title: &Option<String>) -> DomainResult<()> {
    match title {
        Some(title) => Err(DomainError::invalid_enum(field, title.as_str())),
        None => Ok(()),
    }
}

impl CatalogItem {
    fn resolve_variants(&self, selection: &Selection) -> DomainResult<Vec<&VariantOption>> {
        let mut chosen = Vec::new();
        match self.kind() {
            CatalogKind::Rudraksha { options } => {
                reject("size", &selection.size)?;
                reject("certificate", &selection.certificate)?;
                if let Some(title) = &selection.option {
                    chosen.push(pick("option", options, title)?);
                }
            }
            CatalogKind::Bracelet {
                sizes,
                certificates,
            } => {
                reject("option", &selection.option)?;
                if let Some(title) = &selection.size {
                    chosen.push(pick("size", sizes, title)?);
                }
                if let Some(title) = &selection.certificate {
                    chosen.push(pick("certificate", certificates, title)?);
                }
            }
            CatalogKind::Gemstone => {
                reject("option", &selection.option)?;
                reject("size", &selection.size)?;
                reject("certificate", &selection.certificate)?;
            }
        }
        Ok(chosen)
    }

    fn resolve_energization(
        &self,
        selection: &Selection,
    ) -> DomainResult<Option<EnergizationSelection>> {
        let Some(title) = &selection.energization else {
            return Ok(None);
        };
        let addon = self
            .energization()
            .iter()
            .find(|a| &a.title == title)
            .ok_or_else(|| DomainError::invalid_enum("energization", title.as_str()))?;

        let chosen = EnergizationSelection::new(addon.clone(), selection.form_data.clone());
        chosen.validate()?;
        Ok(Some(chosen))
    }

    /// Price a selection the way checkout displays it and the server charges it.
    ///
    /// Rejects items that are not active, variants the item does not offer,
    /// out-of-stock variants and incomplete energization forms.
    pub fn quote(&self, selection: &Selection) -> DomainResult<CheckoutQuote> {
        if !self.can_be_sold() {
            return Err(DomainError::invariant(format!(
                "catalog item {} is not active",
                self.id_typed()
            )));
        }

        let variants = self.resolve_variants(selection)?;
        let energization = self.resolve_energization(selection)?;

        let variant_delta = variants
            .iter()
            .try_fold(Decimal::ZERO, |sum, v| sum.checked_add(v.price_delta))
            .ok_or_else(|| DomainError::precondition("variant price deltas are out of range"))?;
        let energization_delta = energization
            .as_ref()
            .map(EnergizationSelection::price_delta)
            .unwrap_or(Decimal::ZERO);

        Ok(CheckoutQuote {
            variants: variants.iter().map(|v| v.title.clone()).collect(),
            energization,
            price: quote(
                self.base_price(),
                self.discount_percent(),
                variant_delta,
                energization_delta,
            )?,
        })
    }
}
