use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sattva_core::{CatalogItemId, DiscountPercent, Entity, Money};
use sattva_lifecycle::{Lifecycle, LifecycleState};
use sattva_pricing::{EnergizationAddon, VariantOption, compute_final_price};

/// Product family and its variant lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogKind {
    Rudraksha {
        #[serde(default)]
        options: Vec<VariantOption>,
    },
    Bracelet {
        #[serde(default)]
        sizes: Vec<VariantOption>,
        #[serde(default)]
        certificates: Vec<VariantOption>,
    },
    Gemstone,
}

impl CatalogKind {
    pub fn name(&self) -> &'static str {
        match self {
            CatalogKind::Rudraksha { .. } => "rudraksha",
            CatalogKind::Bracelet { .. } => "bracelet",
            CatalogKind::Gemstone => "gemstone",
        }
    }
}

/// Catalog item: a sellable product with its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    id: CatalogItemId,
    title: String,
    #[serde(flatten)]
    kind: CatalogKind,
    base_price: Money,
    #[serde(default)]
    discount_percent: DiscountPercent,
    #[serde(default)]
    energization: Vec<EnergizationAddon>,
    #[serde(flatten)]
    lifecycle: LifecycleState,
}

impl CatalogItem {
    /// A new, active item without energization add-ons.
    pub fn new(
        id: CatalogItemId,
        title: impl Into<String>,
        kind: CatalogKind,
        base_price: Money,
        discount_percent: DiscountPercent,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            base_price,
            discount_percent,
            energization: Vec::new(),
            lifecycle: LifecycleState::active(),
        }
    }

    pub fn with_energization(mut self, addons: Vec<EnergizationAddon>) -> Self {
        self.energization = addons;
        self
    }

    /// Reprice. Orders already placed keep their own snapshot.
    pub fn with_pricing(mut self, base_price: Money, discount_percent: DiscountPercent) -> Self {
        self.base_price = base_price;
        self.discount_percent = discount_percent;
        self
    }

    pub fn id_typed(&self) -> &CatalogItemId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> &CatalogKind {
        &self.kind
    }

    pub fn base_price(&self) -> Money {
        self.base_price
    }

    pub fn discount_percent(&self) -> DiscountPercent {
        self.discount_percent
    }

    pub fn energization(&self) -> &[EnergizationAddon] {
        &self.energization
    }

    /// Check if the item can be sold (must be active, not trashed or purged).
    pub fn can_be_sold(&self) -> bool {
        self.lifecycle.is_active()
    }

    /// Storefront list price: base price after discount, no selections.
    pub fn list_price(&self) -> Decimal {
        compute_final_price(
            self.base_price,
            self.discount_percent,
            Decimal::ZERO,
            Decimal::ZERO,
        )
    }
}

impl Entity for CatalogItem {
    type Id = CatalogItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Lifecycle for CatalogItem {
    fn lifecycle(&self) -> &LifecycleState {
        &self.lifecycle
    }

    fn with_lifecycle(&self, state: LifecycleState) -> Self {
        Self {
            lifecycle: state,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core::str::FromStr;
    use sattva_core::FixedClock;
    use sattva_lifecycle::{LifecycleManager, LifecycleStatus};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn bracelet() -> CatalogItem {
        CatalogItem::new(
            "bracelet-tiger-eye".parse().unwrap(),
            "Tiger Eye Bracelet",
            CatalogKind::Bracelet {
                sizes: vec![VariantOption::new("Medium", Decimal::ZERO)],
                certificates: vec![VariantOption::new("Lab Certificate", dec("250"))],
            },
            Money::new(dec("1499")).unwrap(),
            DiscountPercent::new(dec("20")).unwrap(),
        )
    }

    #[test]
    fn list_price_applies_discount() {
        assert_eq!(bracelet().list_price(), dec("1199.20"));
    }

    #[test]
    fn new_items_are_active_and_sellable() {
        let item = bracelet();
        assert_eq!(item.status(), LifecycleStatus::Active);
        assert!(item.can_be_sold());
        assert_eq!(item.kind().name(), "bracelet");
    }

    #[test]
    fn trashed_items_cannot_be_sold() {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let manager = LifecycleManager::with_clock(FixedClock::at(at));
        let trashed = manager.request_trash(&bracelet()).unwrap();
        assert!(!trashed.can_be_sold());
        assert_eq!(trashed.deleted_at(), Some(at));
        assert_eq!(trashed.title(), "Tiger Eye Bracelet");
    }

    #[test]
    fn wire_shape_flattens_kind_and_lifecycle() {
        let json = serde_json::to_value(bracelet()).unwrap();
        assert_eq!(json["kind"], "bracelet");
        assert_eq!(json["status"], "active");
        assert_eq!(json["basePrice"], "1499");
        assert!(json["deletedAt"].is_null());
        assert!(json.as_object().unwrap().contains_key("deletedAt"));
        assert_eq!(json["certificates"][0]["title"], "Lab Certificate");
    }

    #[test]
    fn deserializes_stored_draft_record() {
        let item: CatalogItem = serde_json::from_str(
            r#"{
                "id": "gem-ruby-1",
                "title": "Burmese Ruby",
                "kind": "gemstone",
                "basePrice": "25000",
                "discountPercent": "5",
                "status": "draft",
                "deletedAt": "2024-01-10T09:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(item.kind(), &CatalogKind::Gemstone);
        assert_eq!(item.status(), LifecycleStatus::Draft);
        assert!(item.energization().is_empty());
    }

    #[test]
    fn rejects_stored_record_breaking_deleted_at_invariant() {
        let result = serde_json::from_str::<CatalogItem>(
            r#"{"id":"gem-1","title":"Ruby","kind":"gemstone","basePrice":"10","status":"purged"}"#,
        );
        assert!(result.is_err());
    }
}
