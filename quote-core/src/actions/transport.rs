//! Editing actions on transport entries.

use tracing::debug;

use crate::error::{QuoteError, Result};
use crate::model::{Currency, Supplier, TransportBinding, TransportItem};
use crate::pricing::transport::{effective_trucks_count, transport_item_price};

/// Refresh the stored `trucks_count` and `total_price` snapshots.
pub fn sync_transport_totals(
    transport: &mut [TransportItem],
    suppliers: &[Supplier],
    truck_load_capacity_kg: f64,
) {
    for item in transport.iter_mut() {
        item.trucks_count = effective_trucks_count(item, suppliers, truck_load_capacity_kg);
        item.total_price = transport_item_price(item, suppliers, truck_load_capacity_kg);
    }
}

/// Pin the truck count to a manually entered value.
pub fn set_manual_trucks(item: &mut TransportItem, trucks: f64) {
    item.is_manual_override = true;
    item.manual_stored_trucks = trucks;
    item.trucks_count = trucks;
    item.total_price = if item.is_supplier_organized {
        0.0
    } else {
        trucks * item.price_per_truck
    };
}

/// Toggle the manual truck override.
///
/// Switching on restores the last manual value (or keeps the current count
/// the first time). Switching off recomputes from weights but keeps the
/// manual value for the next toggle.
pub fn toggle_manual_override(
    item: &mut TransportItem,
    suppliers: &[Supplier],
    truck_load_capacity_kg: f64,
) {
    if item.is_manual_override {
        item.is_manual_override = false;
    } else {
        if item.manual_stored_trucks <= 0.0 {
            item.manual_stored_trucks = item.trucks_count;
        }
        item.is_manual_override = true;
    }

    item.trucks_count = effective_trucks_count(item, suppliers, truck_load_capacity_kg);
    item.total_price = transport_item_price(item, suppliers, truck_load_capacity_kg);
}

/// Merge the shipments of several suppliers into one shared entry.
///
/// Repeated ids count once. Each member's own unmerged entry is removed. The
/// new entry takes the currency and truck price of the first removed entry.
pub fn merge_transport<'a>(
    transport: &'a mut Vec<TransportItem>,
    supplier_ids: &[String],
    merged_id: impl Into<String>,
    name: impl Into<String>,
) -> Result<&'a mut TransportItem> {
    let mut members: Vec<String> = Vec::with_capacity(supplier_ids.len());
    for id in supplier_ids {
        if !members.contains(id) {
            members.push(id.clone());
        }
    }

    if members.len() < 2 {
        return Err(QuoteError::MergeTooSmall {
            count: members.len(),
        });
    }

    let mut template: Option<TransportItem> = None;
    transport.retain(|item| {
        let absorbed = !item.is_merged()
            && item
                .supplier_id
                .as_ref()
                .is_some_and(|id| members.contains(id));
        if absorbed && template.is_none() {
            template = Some(item.clone());
        }
        !absorbed
    });

    let (currency, price_per_truck) = template
        .map_or((Currency::Pln, 0.0), |t| (t.currency, t.price_per_truck));
    let member_count = members.len();
    let mut merged =
        TransportItem::merged(merged_id, members, currency).with_trucks(1.0, price_per_truck);
    merged.name = name.into();
    merged.total_price = price_per_truck;

    debug!(id = %merged.id, members = member_count, "Merged transport created");

    let idx = transport.len();
    transport.push(merged);
    Ok(&mut transport[idx])
}

/// Dissolve a merged entry, giving each member without a transport path its
/// own unmerged entry again.
pub fn unmerge_transport(transport: &mut Vec<TransportItem>, merged_id: &str) -> Result<()> {
    let idx = transport
        .iter()
        .position(|item| item.id == merged_id && item.is_merged())
        .ok_or_else(|| QuoteError::TransportNotFound {
            id: merged_id.to_string(),
        })?;

    let group = transport.remove(idx);
    for supplier_id in &group.linked_supplier_ids {
        if transport.iter().any(|item| item.serves_supplier(supplier_id)) {
            continue;
        }
        let id = format!("{}-{}", group.id, supplier_id);
        transport.push(
            TransportItem::for_supplier(id, supplier_id.clone(), group.currency)
                .with_trucks(1.0, group.price_per_truck),
        );
    }

    Ok(())
}

/// Supplier ids served by more than one transport entry.
pub fn duplicate_transport_paths(transport: &[TransportItem]) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    let mut duplicates: Vec<String> = Vec::new();

    for item in transport {
        let members: Vec<&str> = match item.binding() {
            TransportBinding::Supplier(id) => vec![id],
            TransportBinding::Merged(ids) => ids.iter().map(String::as_str).collect(),
            TransportBinding::Manual => Vec::new(),
        };
        for id in members {
            if seen.contains(&id) {
                if !duplicates.iter().any(|d| d == id) {
                    duplicates.push(id.to_string());
                }
            } else {
                seen.push(id);
            }
        }
    }

    duplicates
}
