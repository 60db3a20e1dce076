//! Supplier offers and their line items.

use serde::{Deserialize, Serialize};

use super::numeric::lenient_f64;
use super::Currency;
use crate::config::ORM_LIST_PRICE_FACTOR;

/// A single line item of a supplier offer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SupplierItem {
    /// Unique item id.
    pub id: String,
    /// Item description.
    pub name: String,
    /// Ordered quantity.
    #[serde(deserialize_with = "lenient_f64")]
    pub quantity: f64,
    /// Unit price; the list price when the supplier is ORM.
    #[serde(deserialize_with = "lenient_f64")]
    pub unit_price: f64,
    /// Weight of one unit in kg.
    #[serde(deserialize_with = "lenient_f64")]
    pub weight: f64,
    /// Installation labor per unit in minutes.
    #[serde(deserialize_with = "lenient_f64")]
    pub time_minutes: f64,
    /// What-if flag: excluded items stay in the list but cost nothing.
    pub is_excluded: bool,
}

impl SupplierItem {
    /// Create a new item.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        unit_price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quantity,
            unit_price,
            ..Default::default()
        }
    }

    /// Total weight of this line in kg.
    pub fn total_weight(&self) -> f64 {
        self.weight * self.quantity
    }

    /// Total labor of this line in minutes.
    pub fn total_minutes(&self) -> f64 {
        self.time_minutes * self.quantity
    }
}

/// A supplier offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Supplier {
    /// Unique supplier id.
    pub id: String,
    /// Supplier name.
    pub name: String,
    /// Line items in offer order.
    pub items: Vec<SupplierItem>,
    /// Currency of all item prices.
    pub currency: Currency,
    /// Discount in percent, subtracted from the subtotal.
    #[serde(deserialize_with = "lenient_f64")]
    pub discount: f64,
    /// Signed percent adjustment applied after the discount.
    #[serde(deserialize_with = "lenient_f64")]
    pub extra_markup_percent: f64,
    /// Original-manufacturer supplier: half list price plus service fee.
    pub is_orm: bool,
    /// What-if flag for the whole supplier.
    pub is_included: bool,
}

impl Default for Supplier {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            items: Vec::new(),
            currency: Currency::default(),
            discount: 0.0,
            extra_markup_percent: 0.0,
            is_orm: false,
            is_included: true,
        }
    }
}

impl Supplier {
    /// Create a new, empty supplier.
    pub fn new(id: impl Into<String>, name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            currency,
            ..Default::default()
        }
    }

    /// Append an item (builder style).
    pub fn with_item(mut self, item: SupplierItem) -> Self {
        self.items.push(item);
        self
    }

    /// Unit price used for costing an item of this supplier.
    pub fn effective_unit_price(&self, item: &SupplierItem) -> f64 {
        if self.is_orm {
            item.unit_price * ORM_LIST_PRICE_FACTOR
        } else {
            item.unit_price
        }
    }

    /// Find an item by id.
    pub fn find_item(&self, item_id: &str) -> Option<&SupplierItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Physical weight of the whole offer in kg, excluded items included.
    pub fn total_weight(&self) -> f64 {
        self.items.iter().map(SupplierItem::total_weight).sum()
    }

    /// Sum of all item quantities.
    pub fn total_quantity(&self) -> f64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Labor minutes of the active (non-excluded) items.
    pub fn active_labor_minutes(&self) -> f64 {
        self.items
            .iter()
            .filter(|i| !i.is_excluded)
            .map(SupplierItem::total_minutes)
            .sum()
    }
}

/// Find a supplier by id.
pub fn find_supplier<'a>(suppliers: &'a [Supplier], supplier_id: &str) -> Option<&'a Supplier> {
    suppliers.iter().find(|s| s.id == supplier_id)
}
