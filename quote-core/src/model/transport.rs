//! Transport entries: per-supplier, merged and manual.

use serde::{Deserialize, Serialize};

use super::numeric::lenient_f64;
use super::Currency;

/// How a transport entry is bound to suppliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportBinding<'a> {
    /// Transport of a single supplier's shipment.
    Supplier(&'a str),
    /// One truck run shared by several suppliers.
    Merged(&'a [String]),
    /// Free-standing entry not tied to any supplier.
    Manual,
}

/// A transport cost entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransportItem {
    /// Unique entry id.
    pub id: String,
    /// Display name (route, carrier).
    pub name: String,
    /// Owning supplier for an unmerged entry.
    pub supplier_id: Option<String>,
    /// Member suppliers of a merged entry.
    pub linked_supplier_ids: Vec<String>,
    /// Number of trucks.
    #[serde(deserialize_with = "lenient_f64")]
    pub trucks_count: f64,
    /// Price of one truck run.
    #[serde(deserialize_with = "lenient_f64")]
    pub price_per_truck: f64,
    /// Last computed total, kept for display.
    #[serde(deserialize_with = "lenient_f64")]
    pub total_price: f64,
    /// Transport is bundled into the supplier's material price.
    pub is_supplier_organized: bool,
    /// Currency of `price_per_truck`.
    pub currency: Currency,
    /// What-if flag.
    pub is_excluded: bool,
    /// Truck count is pinned to `manual_stored_trucks`.
    pub is_manual_override: bool,
    /// Last manually entered truck count.
    #[serde(deserialize_with = "lenient_f64")]
    pub manual_stored_trucks: f64,
}

impl TransportItem {
    /// Create an unmerged entry for one supplier.
    pub fn for_supplier(
        id: impl Into<String>,
        supplier_id: impl Into<String>,
        currency: Currency,
    ) -> Self {
        Self {
            id: id.into(),
            supplier_id: Some(supplier_id.into()),
            trucks_count: 1.0,
            currency,
            ..Default::default()
        }
    }

    /// Create a merged entry shared by several suppliers.
    pub fn merged(id: impl Into<String>, supplier_ids: Vec<String>, currency: Currency) -> Self {
        Self {
            id: id.into(),
            linked_supplier_ids: supplier_ids,
            trucks_count: 1.0,
            currency,
            ..Default::default()
        }
    }

    /// Create a free-standing entry.
    pub fn manual(id: impl Into<String>, name: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            trucks_count: 1.0,
            currency,
            ..Default::default()
        }
    }

    /// Set truck count and price (builder style).
    pub fn with_trucks(mut self, trucks_count: f64, price_per_truck: f64) -> Self {
        self.trucks_count = trucks_count;
        self.price_per_truck = price_per_truck;
        self
    }

    /// How this entry is bound to suppliers.
    ///
    /// A non-empty `linked_supplier_ids` wins over `supplier_id`.
    pub fn binding(&self) -> TransportBinding<'_> {
        if !self.linked_supplier_ids.is_empty() {
            TransportBinding::Merged(&self.linked_supplier_ids)
        } else if let Some(id) = self.supplier_id.as_deref() {
            TransportBinding::Supplier(id)
        } else {
            TransportBinding::Manual
        }
    }

    /// Check if this is a merged entry.
    pub fn is_merged(&self) -> bool {
        matches!(self.binding(), TransportBinding::Merged(_))
    }

    /// Check if this entry carries the given supplier's shipment.
    pub fn serves_supplier(&self, supplier_id: &str) -> bool {
        match self.binding() {
            TransportBinding::Supplier(id) => id == supplier_id,
            TransportBinding::Merged(ids) => ids.iter().any(|id| id == supplier_id),
            TransportBinding::Manual => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding() {
        let single = TransportItem::for_supplier("t1", "s1", Currency::Pln);
        assert_eq!(single.binding(), TransportBinding::Supplier("s1"));
        assert!(single.serves_supplier("s1"));

        let merged = TransportItem::merged("t2", vec!["a".into(), "b".into()], Currency::Eur);
        assert!(merged.is_merged());
        assert!(merged.serves_supplier("b"));
        assert!(!merged.serves_supplier("c"));

        let manual = TransportItem::manual("t3", "Crane delivery", Currency::Pln);
        assert_eq!(manual.binding(), TransportBinding::Manual);
        assert!(!manual.serves_supplier("s1"));
    }

    #[test]
    fn test_linked_ids_win_over_supplier_id() {
        let mut item = TransportItem::for_supplier("t1", "s1", Currency::Pln);
        item.linked_supplier_ids = vec!["s1".into(), "s2".into()];
        assert!(item.is_merged());
    }

    #[test]
    fn test_deserialize_string_numbers() {
        let item: TransportItem = serde_json::from_str(
            r#"{
                "id": "t1",
                "supplierId": "s1",
                "trucksCount": "2",
                "pricePerTruck": "1500,50",
                "currency": "EUR"
            }"#,
        )
        .unwrap();
        assert_eq!(item.trucks_count, 2.0);
        assert_eq!(item.price_per_truck, 1500.5);
        assert_eq!(item.currency, Currency::Eur);
    }
}
