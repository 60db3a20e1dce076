//! Project-level cost aggregation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::convert;
use super::installation::{calculate_installation_cost, InstallationContext};
use super::price::{derive_price, MarginLevel, PriceSummary};
use super::supplier::calculate_supplier_cost;
use super::transport::calculate_transport_costs;
use crate::actions::apply_variant;
use crate::config::{
    DEFAULT_ORM_FEE_PERCENT, DEFAULT_TRUCK_LOAD_CAPACITY_KG, NAMEPLATE_UNIT_PRICE_PLN,
};
use crate::model::{CalculationData, CalculationMode, Currency};

/// Parameters of a project costing run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostOptions {
    /// PLN per 1 EUR.
    pub exchange_rate: f64,
    /// Currency every result is expressed in.
    pub offer_currency: Currency,
    /// Snapshot being costed.
    pub mode: CalculationMode,
    /// ORM service fee in percent.
    pub orm_fee_percent: f64,
    /// Payload of one truck in kg.
    pub truck_load_capacity_kg: f64,
    /// Target margin in percent.
    pub target_margin: f64,
    /// Manual selling price override.
    pub manual_price: Option<f64>,
}

impl CostOptions {
    /// Create options with default fee, capacity and no margin.
    pub fn new(exchange_rate: f64, offer_currency: Currency) -> Self {
        Self {
            exchange_rate,
            offer_currency,
            mode: CalculationMode::Initial,
            orm_fee_percent: DEFAULT_ORM_FEE_PERCENT,
            truck_load_capacity_kg: DEFAULT_TRUCK_LOAD_CAPACITY_KG,
            target_margin: 0.0,
            manual_price: None,
        }
    }

    /// Set the snapshot mode.
    pub fn with_mode(mut self, mode: CalculationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the ORM service fee.
    pub fn with_orm_fee_percent(mut self, orm_fee_percent: f64) -> Self {
        self.orm_fee_percent = orm_fee_percent;
        self
    }

    /// Set the truck payload.
    pub fn with_truck_load_capacity(mut self, truck_load_capacity_kg: f64) -> Self {
        self.truck_load_capacity_kg = truck_load_capacity_kg;
        self
    }

    /// Set the target margin.
    pub fn with_target_margin(mut self, target_margin: f64) -> Self {
        self.target_margin = target_margin;
        self
    }

    /// Set or clear the manual price.
    pub fn with_manual_price(mut self, manual_price: Option<f64>) -> Self {
        self.manual_price = manual_price;
        self
    }
}

/// Cost breakdown of one calculation, in the offer currency.
///
/// `total` is `suppliers + transport + other + installation`. `orm_fee` and
/// `financing` are already part of `suppliers`; `excluded` is what the
/// what-if flags removed. None of the three is added to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Material cost including nameplates.
    pub suppliers: f64,
    /// Transport cost.
    pub transport: f64,
    /// Incidental costs.
    pub other: f64,
    /// Installation cost.
    pub installation: f64,
    /// ORM service fees contained in `suppliers`.
    pub orm_fee: f64,
    /// Extra supplier markups contained in `suppliers`.
    pub financing: f64,
    /// Total cost.
    pub total: f64,
    /// Would-be cost of everything excluded by what-if flags.
    pub excluded: f64,
}

/// Compute the cost breakdown of a calculation.
pub fn calculate_project_costs(data: &CalculationData, options: &CostOptions) -> CostBreakdown {
    let rate = options.exchange_rate;
    let currency = options.offer_currency;
    let mut breakdown = CostBreakdown::default();

    for supplier in &data.suppliers {
        let cost = calculate_supplier_cost(supplier, options.orm_fee_percent);
        breakdown.suppliers += convert(cost.total, supplier.currency, currency, rate);
        breakdown.orm_fee += convert(cost.orm_fee, supplier.currency, currency, rate);
        breakdown.financing += convert(cost.markup, supplier.currency, currency, rate);
        breakdown.excluded += convert(cost.excluded, supplier.currency, currency, rate);
    }

    let nameplates = data.nameplate_qty * NAMEPLATE_UNIT_PRICE_PLN;
    breakdown.suppliers += convert(nameplates, Currency::Pln, currency, rate);

    let transport = calculate_transport_costs(
        &data.transport,
        &data.suppliers,
        options.truck_load_capacity_kg,
        rate,
        currency,
    );
    breakdown.transport = transport.total;
    breakdown.excluded += transport.excluded;

    for cost in &data.other_costs {
        let converted = convert(cost.price, cost.currency, currency, rate);
        if cost.is_excluded {
            breakdown.excluded += converted;
        } else {
            breakdown.other += converted;
        }
    }

    let installation = calculate_installation_cost(
        &data.installation,
        &InstallationContext::new(&data.suppliers),
    );
    breakdown.installation = convert(installation.total, Currency::Pln, currency, rate);
    breakdown.excluded += convert(installation.excluded, Currency::Pln, currency, rate);

    breakdown.total =
        breakdown.suppliers + breakdown.transport + breakdown.other + breakdown.installation;

    debug!(
        mode = %options.mode,
        currency = %currency,
        suppliers = breakdown.suppliers,
        transport = breakdown.transport,
        other = breakdown.other,
        installation = breakdown.installation,
        total = breakdown.total,
        "Project costs calculated"
    );

    breakdown
}

/// Cost breakdown together with the derived price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    /// Snapshot that was costed.
    pub mode: CalculationMode,
    /// Currency of every amount.
    pub offer_currency: Currency,
    /// Cost breakdown.
    pub breakdown: CostBreakdown,
    /// Selling price, margin and profit.
    pub price: PriceSummary,
    /// Rating of the effective margin.
    pub margin_level: MarginLevel,
}

/// Cost a calculation and derive its selling price.
pub fn calculate_project_summary(data: &CalculationData, options: &CostOptions) -> ProjectSummary {
    let breakdown = calculate_project_costs(data, options);
    let price = derive_price(breakdown.total, options.target_margin, options.manual_price);

    ProjectSummary {
        mode: options.mode,
        offer_currency: options.offer_currency,
        breakdown,
        price,
        margin_level: MarginLevel::from_margin(price.margin_percent),
    }
}

/// Costing result of one variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSummary {
    /// Variant id.
    pub id: String,
    /// Variant name.
    pub name: String,
    /// Breakdown and price with the variant applied.
    pub summary: ProjectSummary,
}

/// Cost every variant of a calculation with the same options.
pub fn compare_variants(data: &CalculationData, options: &CostOptions) -> Vec<VariantSummary> {
    data.variants
        .iter()
        .map(|variant| VariantSummary {
            id: variant.id.clone(),
            name: variant.name.clone(),
            summary: calculate_project_summary(&apply_variant(data, variant), options),
        })
        .collect()
}
