//! Incidental project costs.

use serde::{Deserialize, Serialize};

use super::numeric::lenient_f64;
use super::Currency;

/// A flat incidental cost (permits, travel, insurance).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtherCostItem {
    /// Unique entry id.
    pub id: String,
    /// What the cost is for.
    pub description: String,
    /// Flat price.
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    /// Currency of `price`.
    pub currency: Currency,
    /// What-if flag.
    pub is_excluded: bool,
}

impl OtherCostItem {
    /// Create a new cost entry.
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        currency: Currency,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            price,
            currency,
            is_excluded: false,
        }
    }
}
