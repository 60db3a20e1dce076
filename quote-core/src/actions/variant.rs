//! Applying what-if variants.

use crate::error::{QuoteError, Result};
use crate::model::{CalculationData, Variant};

/// Copy of `data` with the variant's exclusions applied.
///
/// Exclusions only add to the flags already set; nothing is re-included.
pub fn apply_variant(data: &CalculationData, variant: &Variant) -> CalculationData {
    fn excluded(ids: &[String], id: &str) -> bool {
        ids.iter().any(|x| x == id)
    }

    let mut result = data.clone();

    for supplier in &mut result.suppliers {
        if excluded(&variant.excluded_supplier_ids, &supplier.id) {
            supplier.is_included = false;
        }
        for item in &mut supplier.items {
            if excluded(&variant.excluded_item_ids, &item.id) {
                item.is_excluded = true;
            }
        }
    }

    for item in &mut result.transport {
        if excluded(&variant.excluded_transport_ids, &item.id) {
            item.is_excluded = true;
        }
    }

    for cost in &mut result.other_costs {
        if excluded(&variant.excluded_other_cost_ids, &cost.id) {
            cost.is_excluded = true;
        }
    }

    for stage in &mut result.installation.stages {
        if excluded(&variant.excluded_stage_ids, &stage.id) {
            stage.is_excluded = true;
        }
    }

    result
}

/// Apply a variant looked up by id.
pub fn apply_variant_by_id(data: &CalculationData, variant_id: &str) -> Result<CalculationData> {
    let variant = data
        .find_variant(variant_id)
        .ok_or_else(|| QuoteError::VariantNotFound {
            id: variant_id.to_string(),
        })?;
    Ok(apply_variant(data, variant))
}
