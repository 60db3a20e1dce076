//! Editing actions on custom installation items.

use crate::model::{CustomInstallationItem, InstallationData, Supplier};
use crate::pricing::installation::resolve_linked_quantity;

/// Set a quantity by hand. A linked item stops following its sources.
pub fn set_custom_item_quantity(item: &mut CustomInstallationItem, quantity: f64) {
    item.quantity = quantity;
    if !item.linked_sources.is_empty() {
        item.is_auto_quantity = false;
    }
}

/// Make a linked item follow its sources again and snapshot the quantity.
///
/// Items without linked sources are left untouched.
pub fn resync_custom_item(item: &mut CustomInstallationItem, suppliers: &[Supplier]) {
    if item.linked_sources.is_empty() {
        return;
    }
    item.is_auto_quantity = true;
    item.quantity = resolve_linked_quantity(&item.linked_sources, suppliers);
}

/// Refresh the quantity snapshot of every auto-synced item, global and
/// stage-local. Returns the number of items whose quantity changed.
pub fn sync_linked_quantities(
    installation: &mut InstallationData,
    suppliers: &[Supplier],
) -> usize {
    let stage_items = installation
        .stages
        .iter_mut()
        .flat_map(|stage| stage.custom_items.iter_mut());

    let mut changed = 0;
    for item in installation.custom_items.iter_mut().chain(stage_items) {
        if !item.is_auto_linked() {
            continue;
        }
        let quantity = resolve_linked_quantity(&item.linked_sources, suppliers);
        if quantity != item.quantity {
            item.quantity = quantity;
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CalcMethod, Currency, InstallationStage, LinkedSource, SupplierItem};

    fn suppliers() -> Vec<Supplier> {
        vec![Supplier::new("s1", "Racks", Currency::Pln)
            .with_item(SupplierItem::new("i1", "Upright", 12.0, 100.0))
            .with_item(SupplierItem::new("i2", "Beam", 30.0, 20.0))]
    }

    fn linked(id: &str, source: LinkedSource) -> CustomInstallationItem {
        CustomInstallationItem {
            linked_sources: vec![source],
            is_auto_quantity: true,
            ..CustomInstallationItem::new(id, "Anchors", 0.0, 2.0)
        }
    }

    #[test]
    fn test_manual_edit_breaks_sync() {
        let mut item = linked("c1", LinkedSource::Item { id: "i1".into() });
        set_custom_item_quantity(&mut item, 5.0);
        assert_eq!(item.quantity, 5.0);
        assert!(!item.is_auto_quantity);

        let mut plain = CustomInstallationItem::new("c2", "Paint", 1.0, 10.0);
        set_custom_item_quantity(&mut plain, 3.0);
        assert_eq!(plain.quantity, 3.0);
        assert!(!plain.is_auto_quantity);
    }

    #[test]
    fn test_resync() {
        let mut item = linked("c1", LinkedSource::Group { id: "s1".into() });
        set_custom_item_quantity(&mut item, 5.0);
        resync_custom_item(&mut item, &suppliers());
        assert!(item.is_auto_quantity);
        assert_eq!(item.quantity, 42.0);
    }

    #[test]
    fn test_resync_without_sources_is_noop() {
        let mut item = CustomInstallationItem::new("c1", "Paint", 1.0, 10.0);
        resync_custom_item(&mut item, &suppliers());
        assert!(!item.is_auto_quantity);
        assert_eq!(item.quantity, 1.0);
    }

    #[test]
    fn test_sync_all_items() {
        let mut manual = linked("c3", LinkedSource::Item { id: "i1".into() });
        manual.is_auto_quantity = false;
        manual.quantity = 99.0;

        let mut installation = InstallationData {
            custom_items: vec![linked("c1", LinkedSource::Item { id: "i2".into() }), manual],
            ..Default::default()
        };
        let mut stage = InstallationStage::new("st1", "Hall", CalcMethod::Pallets);
        stage.custom_items.push(linked("c2", LinkedSource::Item { id: "i1".into() }));
        installation.stages.push(stage);

        assert_eq!(sync_linked_quantities(&mut installation, &suppliers()), 2);
        assert_eq!(installation.custom_items[0].quantity, 30.0);
        assert_eq!(installation.custom_items[1].quantity, 99.0);
        assert_eq!(installation.stages[0].custom_items[0].quantity, 12.0);

        assert_eq!(sync_linked_quantities(&mut installation, &suppliers()), 0);
    }
}
