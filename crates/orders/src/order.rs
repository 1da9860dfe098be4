use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sattva_catalog::{CatalogItem, Selection};
use sattva_core::{CatalogItemId, DomainError, DomainResult, Entity, OrderId};
use sattva_lifecycle::{Lifecycle, LifecycleState};
use sattva_pricing::EnergizationForm;

/// A line to be placed: an item, what was picked on its page, how many.
#[derive(Debug, Clone)]
pub struct LineRequest<'a> {
    pub item: &'a CatalogItem,
    pub selection: Selection,
    pub quantity: u32,
}

impl<'a> LineRequest<'a> {
    pub fn new(item: &'a CatalogItem, selection: Selection, quantity: u32) -> Self {
        Self {
            item,
            selection,
            quantity,
        }
    }
}

/// Order line snapshot, frozen at placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub line_no: u32,
    pub catalog_item_id: CatalogItemId,
    pub title: String,
    pub variants: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_data: Option<EnergizationForm>,
    pub quantity: u32,
    /// Final per-unit price as charged.
    pub unit_price: Decimal,
}

fn total_out_of_range() -> DomainError {
    DomainError::precondition("order total is out of range")
}

impl OrderLine {
    pub fn line_total(&self) -> DomainResult<Decimal> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(total_out_of_range)
    }
}

/// Aggregate root: Order (placed or draft).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    id: OrderId,
    placed_at: DateTime<Utc>,
    lines: Vec<OrderLine>,
    #[serde(flatten)]
    lifecycle: LifecycleState,
}

impl Order {
    /// Price every line through the catalog quote path and freeze the result.
    ///
    /// The unit price stored here is the one checkout displayed; later catalog
    /// price changes do not reach it.
    pub fn place(
        id: OrderId,
        placed_at: DateTime<Utc>,
        requests: &[LineRequest<'_>],
    ) -> DomainResult<Self> {
        if requests.is_empty() {
            return Err(DomainError::validation("order must contain at least one line"));
        }

        let mut lines = Vec::with_capacity(requests.len());
        for (idx, request) in requests.iter().enumerate() {
            if request.quantity == 0 {
                return Err(DomainError::validation(format!(
                    "line {}: quantity must be positive",
                    idx + 1
                )));
            }

            let quote = request.item.quote(&request.selection)?;
            let (energization, form_data) = match quote.energization {
                Some(chosen) => (Some(chosen.addon.title), chosen.form_data),
                None => (None, None),
            };

            lines.push(OrderLine {
                line_no: (idx + 1) as u32,
                catalog_item_id: request.item.id_typed().clone(),
                title: request.item.title().to_string(),
                variants: quote.variants,
                energization,
                form_data,
                quantity: request.quantity,
                unit_price: quote.price.final_price,
            });
        }

        let order = Self {
            id,
            placed_at,
            lines,
            lifecycle: LifecycleState::active(),
        };
        order.total()?;
        Ok(order)
    }

    pub fn id_typed(&self) -> &OrderId {
        &self.id
    }

    pub fn placed_at(&self) -> DateTime<Utc> {
        self.placed_at
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Sum of `unit_price * quantity` over all lines.
    pub fn total(&self) -> DomainResult<Decimal> {
        self.lines.iter().try_fold(Decimal::ZERO, |sum, line| {
            sum.checked_add(line.line_total()?)
                .ok_or_else(total_out_of_range)
        })
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Lifecycle for Order {
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
    use chrono::{Duration, TimeZone};
    use core::str::FromStr;
    use sattva_catalog::CatalogKind;
    use sattva_core::{DiscountPercent, FixedClock, Money};
    use sattva_lifecycle::{LifecycleManager, LifecycleStatus, is_purge_due};
    use sattva_pricing::{EnergizationAddon, VariantOption};

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn placed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 20, 16, 30, 0).unwrap()
    }

    fn order_id() -> OrderId {
        "ord-1001".parse().unwrap()
    }

    fn rudraksha() -> CatalogItem {
        CatalogItem::new(
            "rudraksha-1-mukhi".parse().unwrap(),
            "1 Mukhi Rudraksha",
            CatalogKind::Rudraksha {
                options: vec![
                    VariantOption::new("Regular", Decimal::ZERO),
                    VariantOption::new("Silver Capped", dec("450")),
                ],
            },
            Money::new(dec("2100")).unwrap(),
            DiscountPercent::new(dec("15")).unwrap(),
        )
        .with_energization(vec![EnergizationAddon::new(
            "Temple Energization",
            dec("251"),
            false,
        )])
    }

    fn gemstone() -> CatalogItem {
        CatalogItem::new(
            "gem-yellow-sapphire".parse().unwrap(),
            "Yellow Sapphire",
            CatalogKind::Gemstone,
            Money::new(dec("8999.99")).unwrap(),
            DiscountPercent::NONE,
        )
    }

    #[test]
    fn place_snapshots_unit_prices() {
        let rudraksha = rudraksha();
        let gem = gemstone();
        let order = Order::place(
            order_id(),
            placed_at(),
            &[
                LineRequest::new(
                    &rudraksha,
                    Selection::option("Silver Capped").with_energization("Temple Energization", None),
                    2,
                ),
                LineRequest::new(&gem, Selection::none(), 1),
            ],
        )
        .unwrap();

        assert_eq!(order.lines().len(), 2);
        let first = &order.lines()[0];
        assert_eq!(first.line_no, 1);
        // (2100 + 450 + 251) * 0.85
        assert_eq!(first.unit_price, dec("2380.85"));
        assert_eq!(first.energization.as_deref(), Some("Temple Energization"));
        assert_eq!(first.variants, vec!["Silver Capped".to_string()]);
        assert_eq!(first.line_total().unwrap(), dec("4761.70"));
        assert_eq!(order.total().unwrap(), dec("4761.70") + dec("8999.99"));
        assert_eq!(order.status(), LifecycleStatus::Active);
    }

    #[test]
    fn snapshot_ignores_later_price_changes() {
        let item = rudraksha();
        let order = Order::place(
            order_id(),
            placed_at(),
            &[LineRequest::new(&item, Selection::option("Regular"), 1)],
        )
        .unwrap();

        let repriced = item.with_pricing(Money::new(dec("5000")).unwrap(), DiscountPercent::NONE);
        assert_eq!(repriced.list_price(), dec("5000.00"));
        assert_eq!(order.lines()[0].unit_price, dec("1785.00"));
    }

    #[test]
    fn place_rejects_empty_order() {
        let err = Order::place(order_id(), placed_at(), &[]).unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn place_rejects_zero_quantity() {
        let gem = gemstone();
        let err = Order::place(
            order_id(),
            placed_at(),
            &[LineRequest::new(&gem, Selection::none(), 0)],
        )
        .unwrap_err();
        assert_eq!(err.code(), "validation_error");
    }

    #[test]
    fn place_rejects_totals_out_of_range() {
        let priceless = CatalogItem::new(
            "gem-koh-i-noor".parse().unwrap(),
            "Koh-i-Noor",
            CatalogKind::Gemstone,
            Money::new(Decimal::MAX).unwrap(),
            DiscountPercent::NONE,
        );
        let err = Order::place(
            order_id(),
            placed_at(),
            &[LineRequest::new(&priceless, Selection::none(), 2)],
        )
        .unwrap_err();
        assert_eq!(err.code(), "precondition_failed");

        let err = Order::place(
            order_id(),
            placed_at(),
            &[
                LineRequest::new(&priceless, Selection::none(), 1),
                LineRequest::new(&priceless, Selection::none(), 1),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Precondition(_)));
    }

    #[test]
    fn place_propagates_selection_errors() {
        let gem = gemstone();
        let err = Order::place(
            order_id(),
            placed_at(),
            &[LineRequest::new(&gem, Selection::option("Oval Cut"), 1)],
        )
        .unwrap_err();
        assert_eq!(err.code(), "invalid_enum");
    }

    #[test]
    fn orders_share_the_catalog_lifecycle() {
        let gem = gemstone();
        let order = Order::place(
            order_id(),
            placed_at(),
            &[LineRequest::new(&gem, Selection::none(), 1)],
        )
        .unwrap();

        let trashed_at = placed_at() + Duration::days(1);
        let manager = LifecycleManager::with_clock(FixedClock::at(trashed_at));
        let draft = manager.request_trash(&order).unwrap();
        assert_eq!(draft.status(), LifecycleStatus::Draft);
        assert_eq!(draft.lines(), order.lines());

        assert!(!is_purge_due(&draft, trashed_at));
        assert!(is_purge_due(&draft, trashed_at + Duration::days(30)));

        let purged = manager.request_hard_delete(&draft).unwrap();
        assert!(manager.request_restore(&purged).is_err());
    }

    #[test]
    fn wire_shape_carries_lifecycle_fields() {
        let gem = gemstone();
        let order = Order::place(
            order_id(),
            placed_at(),
            &[LineRequest::new(&gem, Selection::none(), 3)],
        )
        .unwrap();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["id"], "ord-1001");
        assert_eq!(json["status"], "active");
        assert_eq!(json["lines"][0]["unitPrice"], "8999.99");

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
