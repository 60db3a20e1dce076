//! Supplier cost aggregation.

use serde::Serialize;

use crate::model::{Supplier, SupplierItem};

/// Cost of one supplier, in the supplier's own currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierCost {
    /// Sum of active item lines at effective unit price.
    pub subtotal: f64,
    /// Subtotal after discount.
    pub discounted: f64,
    /// Discounted amount after the extra markup.
    pub adjusted: f64,
    /// Extra markup amount (`adjusted - discounted`).
    pub markup: f64,
    /// ORM service fee.
    pub orm_fee: f64,
    /// Supplier cost: `adjusted + orm_fee`.
    pub total: f64,
    /// What the what-if flags removed from `total`.
    pub excluded: f64,
}

/// Run the discount, markup and fee chain over a set of items.
fn price_items<'a>(
    supplier: &Supplier,
    items: impl Iterator<Item = &'a SupplierItem>,
    orm_fee_percent: f64,
) -> SupplierCost {
    let subtotal: f64 = items
        .map(|item| item.quantity * supplier.effective_unit_price(item))
        .sum();
    let discounted = subtotal * (1.0 - supplier.discount / 100.0);
    let adjusted = discounted * (1.0 + supplier.extra_markup_percent / 100.0);
    let orm_fee = if supplier.is_orm {
        adjusted * (orm_fee_percent / 100.0)
    } else {
        0.0
    };

    SupplierCost {
        subtotal,
        discounted,
        adjusted,
        markup: adjusted - discounted,
        orm_fee,
        total: adjusted + orm_fee,
        excluded: 0.0,
    }
}

/// Cost of a supplier, honoring item exclusion and supplier inclusion.
///
/// An excluded supplier (`is_included == false`) costs nothing; its would-be
/// cost is reported in `excluded`.
pub fn calculate_supplier_cost(supplier: &Supplier, orm_fee_percent: f64) -> SupplierCost {
    let full = price_items(supplier, supplier.items.iter(), orm_fee_percent);

    if !supplier.is_included {
        return SupplierCost {
            excluded: full.total,
            ..Default::default()
        };
    }

    let active = price_items(
        supplier,
        supplier.items.iter().filter(|item| !item.is_excluded),
        orm_fee_percent,
    );

    SupplierCost {
        excluded: full.total - active.total,
        ..active
    }
}
