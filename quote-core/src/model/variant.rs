//! Named what-if variants of a calculation.

use serde::{Deserialize, Serialize};

/// A named set of what-if exclusions applied on top of a calculation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Variant {
    /// Unique variant id.
    pub id: String,
    /// Variant name shown to the customer.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Suppliers left out of this variant.
    pub excluded_supplier_ids: Vec<String>,
    /// Supplier items left out of this variant.
    pub excluded_item_ids: Vec<String>,
    /// Transport entries left out of this variant.
    pub excluded_transport_ids: Vec<String>,
    /// Other cost entries left out of this variant.
    pub excluded_other_cost_ids: Vec<String>,
    /// Installation stages left out of this variant.
    pub excluded_stage_ids: Vec<String>,
}

impl Variant {
    /// Create an empty variant.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}
