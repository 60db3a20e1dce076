//! Sanity checks on a calculation before it is quoted.
//!
//! Costing never depends on validation; these checks only surface input the
//! editor would want to flag.

use crate::actions::duplicate_transport_paths;
use crate::model::{find_supplier, CalculationData, Currency, CustomInstallationItem, LinkedSource};

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate a calculation against the rate and currency it will be costed
/// with.
pub fn validate_calculation(
    data: &CalculationData,
    exchange_rate: f64,
    offer_currency: Currency,
) -> ValidationResult {
    let mut result = ValidationResult::ok();

    result.merge(validate_suppliers(data));
    result.merge(validate_transport(data));
    result.merge(validate_installation(data));

    if exchange_rate <= 0.0 && needs_conversion(data, offer_currency) {
        result.add_error(format!(
            "Exchange rate {} is not positive but amounts must be converted to {}",
            exchange_rate, offer_currency
        ));
    }

    result
}

/// Check suppliers and their items.
pub fn validate_suppliers(data: &CalculationData) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for supplier in &data.suppliers {
        if supplier.discount > 100.0 {
            result.add_warning(format!(
                "Supplier {}: Discount {}% exceeds 100%, cost will be negative",
                supplier.name, supplier.discount
            ));
        } else if supplier.discount < 0.0 {
            result.add_warning(format!(
                "Supplier {}: Negative discount {}%",
                supplier.name, supplier.discount
            ));
        }

        for (item_idx, item) in supplier.items.iter().enumerate() {
            if item.quantity < 0.0 {
                result.add_warning(format!(
                    "Supplier {}, Item {}: Negative quantity {}",
                    supplier.name,
                    item_idx + 1,
                    item.quantity
                ));
            }
            if item.unit_price < 0.0 {
                result.add_warning(format!(
                    "Supplier {}, Item {}: Negative unit price {}",
                    supplier.name,
                    item_idx + 1,
                    item.unit_price
                ));
            }
        }
    }

    result
}

/// Check transport bindings.
pub fn validate_transport(data: &CalculationData) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for item in &data.transport {
        let members = item
            .supplier_id
            .iter()
            .filter(|_| !item.is_merged())
            .chain(item.linked_supplier_ids.iter());
        for supplier_id in members {
            if find_supplier(&data.suppliers, supplier_id).is_none() {
                result.add_error(format!(
                    "Transport {}: Supplier {} not found",
                    item.id, supplier_id
                ));
            }
        }

        if item.linked_supplier_ids.len() == 1 {
            result.add_warning(format!(
                "Transport {}: Merged transport has a single supplier",
                item.id
            ));
        }
    }

    for supplier_id in duplicate_transport_paths(&data.transport) {
        result.add_warning(format!(
            "Supplier {} is carried by more than one transport entry",
            supplier_id
        ));
    }

    result
}

/// Check installation stages and custom item links.
pub fn validate_installation(data: &CalculationData) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for stage in &data.installation.stages {
        for (idx, supplier_id) in stage.linked_supplier_ids.iter().enumerate() {
            if stage.linked_supplier_ids[..idx].contains(supplier_id) {
                result.add_warning(format!(
                    "Stage {}: Supplier {} is linked more than once",
                    stage.name, supplier_id
                ));
                continue;
            }
            if find_supplier(&data.suppliers, supplier_id).is_none() {
                result.add_error(format!(
                    "Stage {}: Linked supplier {} not found",
                    stage.name, supplier_id
                ));
            }
        }

        if stage.calc_method.includes_time() && stage.installers_count <= 0.0 {
            result.add_warning(format!(
                "Stage {}: Time-based pricing without installers",
                stage.name
            ));
        }

        check_links(&mut result, data, &stage.custom_items);
    }

    check_links(&mut result, data, &data.installation.custom_items);

    result
}

fn check_links(
    result: &mut ValidationResult,
    data: &CalculationData,
    items: &[CustomInstallationItem],
) {
    for item in items {
        for source in &item.linked_sources {
            let found = match source {
                LinkedSource::Group { id } => find_supplier(&data.suppliers, id).is_some(),
                LinkedSource::Item { id } => {
                    data.suppliers.iter().any(|s| s.find_item(id).is_some())
                }
            };
            if !found {
                result.add_warning(format!(
                    "Custom item {}: Linked source {:?} not found",
                    item.name, source
                ));
            }
        }
    }
}

/// Check if any amount is held in a currency other than the offer currency.
///
/// Nameplates and the whole installation section are priced in PLN.
fn needs_conversion(data: &CalculationData, offer_currency: Currency) -> bool {
    let foreign = |currency: Currency| currency != offer_currency;
    let installation = &data.installation;
    let has_pln_costs = data.nameplate_qty != 0.0
        || installation.other_installation_costs != 0.0
        || !installation.stages.is_empty()
        || !installation.custom_items.is_empty();

    data.suppliers.iter().any(|s| foreign(s.currency))
        || data.transport.iter().any(|t| foreign(t.currency))
        || data.other_costs.iter().any(|c| foreign(c.currency))
        || (has_pln_costs && foreign(Currency::Pln))
}
