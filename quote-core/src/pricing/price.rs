//! Selling price derivation from a target margin or a manual price.

use serde::Serialize;

use crate::config::{MARGIN_CRITICAL_PERCENT, MARGIN_OVERFLOW_MULTIPLIER, MARGIN_WARNING_PERCENT};

/// Selling price, margin and profit for a given cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    /// Price offered to the customer.
    pub selling_price: f64,
    /// Effective margin in percent of the selling price.
    pub margin_percent: f64,
    /// `selling_price - total cost`.
    pub profit: f64,
}

/// Traffic-light rating of a margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarginLevel {
    /// Below the critical threshold.
    Critical,
    /// Below the warning threshold.
    Warning,
    /// Healthy margin.
    Ok,
}

impl MarginLevel {
    /// Rate a margin given in percent.
    pub fn from_margin(margin_percent: f64) -> Self {
        if margin_percent < MARGIN_CRITICAL_PERCENT {
            MarginLevel::Critical
        } else if margin_percent < MARGIN_WARNING_PERCENT {
            MarginLevel::Warning
        } else {
            MarginLevel::Ok
        }
    }
}

impl std::fmt::Display for MarginLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarginLevel::Critical => write!(f, "CRITICAL"),
            MarginLevel::Warning => write!(f, "WARNING"),
            MarginLevel::Ok => write!(f, "OK"),
        }
    }
}

/// Selling price for a target margin in percent.
///
/// At 100% or more there is no finite price, so the cost is multiplied by a
/// large constant instead (0 when there is no positive cost).
pub fn price_for_margin(total: f64, target_margin: f64) -> f64 {
    let margin = target_margin / 100.0;
    if margin >= 1.0 {
        if total > 0.0 {
            total * MARGIN_OVERFLOW_MULTIPLIER
        } else {
            0.0
        }
    } else {
        total / (1.0 - margin)
    }
}

/// Effective margin in percent of a selling price; 0 for a zero price.
pub fn margin_for_price(total: f64, selling_price: f64) -> f64 {
    if selling_price != 0.0 {
        (1.0 - total / selling_price) * 100.0
    } else {
        0.0
    }
}

/// Derive selling price, margin and profit from a total cost.
///
/// A manual price overrides the target margin.
pub fn derive_price(total: f64, target_margin: f64, manual_price: Option<f64>) -> PriceSummary {
    let selling_price = match manual_price {
        Some(price) => price,
        None => price_for_margin(total, target_margin),
    };

    PriceSummary {
        selling_price,
        margin_percent: margin_for_price(total, selling_price),
        profit: selling_price - total,
    }
}
