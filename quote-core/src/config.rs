//! Configuration constants and settings for the pricing engine.

use serde::{Deserialize, Serialize};

use crate::model::numeric::lenient_f64;

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// ORM suppliers are costed at this fraction of their list price.
pub const ORM_LIST_PRICE_FACTOR: f64 = 0.5;

/// Default ORM service fee in percent.
pub const DEFAULT_ORM_FEE_PERCENT: f64 = 1.6;

/// Fixed price of a single nameplate in PLN.
pub const NAMEPLATE_UNIT_PRICE_PLN: f64 = 19.0;

/// Margin (percent) below which a quote is flagged as critical.
pub const MARGIN_CRITICAL_PERCENT: f64 = 6.0;

/// Margin (percent) below which a quote is flagged as a warning.
pub const MARGIN_WARNING_PERCENT: f64 = 7.0;

/// Multiplier used when the target margin reaches 100% or more.
///
/// `total / (1 - margin)` has no finite answer there, so the selling price is
/// pinned to a large but displayable value instead.
pub const MARGIN_OVERFLOW_MULTIPLIER: f64 = 999.0;

/// Default payload of one truck in kilograms.
pub const DEFAULT_TRUCK_LOAD_CAPACITY_KG: f64 = 24_000.0;

/// Minutes per labor hour.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Project-wide settings stored alongside the calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    /// ORM service fee in percent, applied on top of ORM supplier subtotals.
    #[serde(deserialize_with = "lenient_f64")]
    pub orm_fee_percent: f64,
    /// Payload of one truck, used to size ORM transports from item weights.
    #[serde(deserialize_with = "lenient_f64")]
    pub truck_load_capacity_kg: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            orm_fee_percent: DEFAULT_ORM_FEE_PERCENT,
            truck_load_capacity_kg: DEFAULT_TRUCK_LOAD_CAPACITY_KG,
        }
    }
}

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a float is approximately zero.
    #[inline]
    pub fn approx_zero(a: f64) -> bool {
        a.abs() < EPS
    }
}

/// Division helpers that never produce NaN or infinity.
pub mod safe_div {
    /// `numerator / denominator`, or 0 when the denominator is zero.
    #[inline]
    pub fn div_or_zero(numerator: f64, denominator: f64) -> f64 {
        if denominator == 0.0 {
            0.0
        } else {
            numerator / denominator
        }
    }

    /// Whole periods needed to cover `amount` at `per_period`, or 0 when
    /// `per_period` is not positive.
    #[inline]
    pub fn ceil_div(amount: f64, per_period: f64) -> f64 {
        if per_period > 0.0 {
            (amount / per_period).ceil()
        } else {
            0.0
        }
    }
}
