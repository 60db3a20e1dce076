//! Transport cost aggregation.

use serde::Serialize;
use tracing::debug;

use super::convert;
use crate::config::safe_div::ceil_div;
use crate::model::{find_supplier, Currency, Supplier, TransportBinding, TransportItem};

/// Aggregated transport cost in the offer currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TransportCost {
    /// Sum of active entries.
    pub total: f64,
    /// Sum of entries skipped by what-if flags.
    pub excluded: f64,
}

/// Trucks needed to carry a supplier's goods, from item weights.
///
/// Excluded items still count: truck sizing follows what is physically
/// shipped.
pub fn auto_trucks_count(supplier: &Supplier, truck_load_capacity_kg: f64) -> f64 {
    ceil_div(supplier.total_weight(), truck_load_capacity_kg)
}

/// Truck count used for costing an entry.
///
/// A manual override wins. An unmerged ORM entry with known weights is sized
/// automatically. Anything else uses the stored count.
pub fn effective_trucks_count(
    item: &TransportItem,
    suppliers: &[Supplier],
    truck_load_capacity_kg: f64,
) -> f64 {
    if item.is_manual_override {
        return item.manual_stored_trucks;
    }

    if let TransportBinding::Supplier(supplier_id) = item.binding() {
        if let Some(supplier) = find_supplier(suppliers, supplier_id) {
            if supplier.is_orm && supplier.total_weight() > 0.0 {
                return auto_trucks_count(supplier, truck_load_capacity_kg);
            }
        }
    }

    item.trucks_count
}

/// Price of an entry in its own currency, ignoring what-if flags.
pub fn transport_item_price(
    item: &TransportItem,
    suppliers: &[Supplier],
    truck_load_capacity_kg: f64,
) -> f64 {
    if item.is_supplier_organized {
        0.0
    } else {
        effective_trucks_count(item, suppliers, truck_load_capacity_kg) * item.price_per_truck
    }
}

/// Suppliers missing from the list count as included.
fn supplier_is_included(suppliers: &[Supplier], supplier_id: &str) -> bool {
    find_supplier(suppliers, supplier_id).map_or(true, |s| s.is_included)
}

/// Check if an entry contributes to the active total.
///
/// A single-supplier entry follows its supplier; a merged entry stays active
/// while at least one member supplier is included.
pub fn is_transport_active(item: &TransportItem, suppliers: &[Supplier]) -> bool {
    if item.is_excluded {
        return false;
    }

    match item.binding() {
        TransportBinding::Supplier(id) => supplier_is_included(suppliers, id),
        TransportBinding::Merged(ids) => ids.iter().any(|id| supplier_is_included(suppliers, id)),
        TransportBinding::Manual => true,
    }
}

/// Sum all transport entries in the offer currency.
pub fn calculate_transport_costs(
    transport: &[TransportItem],
    suppliers: &[Supplier],
    truck_load_capacity_kg: f64,
    exchange_rate: f64,
    offer_currency: Currency,
) -> TransportCost {
    let mut cost = TransportCost::default();

    for item in transport {
        let price = transport_item_price(item, suppliers, truck_load_capacity_kg);
        let converted = convert(price, item.currency, offer_currency, exchange_rate);

        if is_transport_active(item, suppliers) {
            cost.total += converted;
        } else {
            cost.excluded += converted;
        }
    }

    debug!(
        entries = transport.len(),
        total = cost.total,
        excluded = cost.excluded,
        "Transport costs calculated"
    );

    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::float_cmp::approx_eq;
    use crate::model::SupplierItem;

    const CAPACITY: f64 = 24_000.0;

    fn supplier(id: &str, included: bool) -> Supplier {
        Supplier {
            is_included: included,
            ..Supplier::new(id, id, Currency::Pln)
        }
    }

    fn heavy_orm_supplier() -> Supplier {
        let mut s = supplier("orm", true).with_item(SupplierItem {
            weight: 1_000.0,
            ..SupplierItem::new("i1", "Frame", 30.0, 10.0)
        });
        s.is_orm = true;
        s
    }

    // ==================== price tests ====================

    #[test]
    fn test_trucks_times_price() {
        let item = TransportItem::manual("t1", "Delivery", Currency::Pln).with_trucks(3.0, 200.0);
        assert_eq!(transport_item_price(&item, &[], CAPACITY), 600.0);
    }

    #[test]
    fn test_supplier_organized_is_free() {
        let mut item =
            TransportItem::for_supplier("t1", "s1", Currency::Pln).with_trucks(3.0, 200.0);
        item.is_supplier_organized = true;
        assert_eq!(
            transport_item_price(&item, &[supplier("s1", true)], CAPACITY),
            0.0
        );
    }

    // ==================== truck count tests ====================

    #[test]
    fn test_auto_trucks_for_orm() {
        let suppliers = vec![heavy_orm_supplier()];
        let item = TransportItem::for_supplier("t1", "orm", Currency::Pln).with_trucks(1.0, 100.0);
        // 30 000 kg over 24 000 kg trucks
        assert_eq!(effective_trucks_count(&item, &suppliers, CAPACITY), 2.0);
        assert_eq!(transport_item_price(&item, &suppliers, CAPACITY), 200.0);
    }

    #[test]
    fn test_auto_trucks_count_excluded_items() {
        let mut orm = heavy_orm_supplier();
        orm.items[0].is_excluded = true;
        assert_eq!(auto_trucks_count(&orm, CAPACITY), 2.0);
    }

    #[test]
    fn test_manual_override_pins_trucks() {
        let suppliers = vec![heavy_orm_supplier()];
        let mut item =
            TransportItem::for_supplier("t1", "orm", Currency::Pln).with_trucks(1.0, 100.0);
        item.is_manual_override = true;
        item.manual_stored_trucks = 5.0;
        assert_eq!(effective_trucks_count(&item, &suppliers, CAPACITY), 5.0);
    }

    #[test]
    fn test_non_orm_uses_stored_count() {
        let mut s = heavy_orm_supplier();
        s.is_orm = false;
        let item = TransportItem::for_supplier("t1", "orm", Currency::Pln).with_trucks(4.0, 100.0);
        assert_eq!(effective_trucks_count(&item, &[s], CAPACITY), 4.0);
    }

    #[test]
    fn test_zero_capacity_gives_zero_trucks() {
        assert_eq!(auto_trucks_count(&heavy_orm_supplier(), 0.0), 0.0);
    }

    // ==================== activity tests ====================

    #[test]
    fn test_single_supplier_follows_inclusion() {
        let item = TransportItem::for_supplier("t1", "a", Currency::Pln);
        assert!(is_transport_active(&item, &[supplier("a", true)]));
        assert!(!is_transport_active(&item, &[supplier("a", false)]));
    }

    #[test]
    fn test_merged_active_while_one_member_included() {
        let item = TransportItem::merged("t1", vec!["a".into(), "b".into()], Currency::Pln);
        assert!(is_transport_active(
            &item,
            &[supplier("a", true), supplier("b", false)]
        ));
        assert!(!is_transport_active(
            &item,
            &[supplier("a", false), supplier("b", false)]
        ));
    }

    #[test]
    fn test_excluded_flag_wins() {
        let mut item = TransportItem::manual("t1", "Delivery", Currency::Pln);
        item.is_excluded = true;
        assert!(!is_transport_active(&item, &[]));
    }

    #[test]
    fn test_unknown_supplier_counts_as_included() {
        let item = TransportItem::for_supplier("t1", "ghost", Currency::Pln);
        assert!(is_transport_active(&item, &[]));
    }

    // ==================== aggregation tests ====================

    #[test]
    fn test_aggregate_converts_and_splits_excluded() {
        let suppliers = vec![supplier("a", true), supplier("b", false)];
        let transport = vec![
            TransportItem::for_supplier("t1", "a", Currency::Eur).with_trucks(1.0, 100.0),
            TransportItem::for_supplier("t2", "b", Currency::Pln).with_trucks(2.0, 50.0),
            TransportItem::merged("t3", vec!["a".into(), "b".into()], Currency::Pln)
                .with_trucks(1.0, 70.0),
        ];

        let cost = calculate_transport_costs(&transport, &suppliers, CAPACITY, 4.0, Currency::Pln);
        assert!(approx_eq(cost.total, 470.0));
        assert!(approx_eq(cost.excluded, 100.0));
    }

    #[test]
    fn test_aggregate_empty() {
        let cost = calculate_transport_costs(&[], &[], CAPACITY, 4.3, Currency::Eur);
        assert_eq!(cost, TransportCost::default());
    }
}
