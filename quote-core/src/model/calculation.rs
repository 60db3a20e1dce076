//! Calculation snapshots and the application state that holds them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::numeric::{lenient_f64, lenient_opt_f64};
use super::{Currency, InstallationData, OtherCostItem, Supplier, TransportItem, Variant};
use crate::config::GlobalSettings;
use crate::error::QuoteError;
use crate::pricing::{calculate_project_summary, CostOptions, ProjectSummary};

/// Which calculation snapshot is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CalculationMode {
    /// Quote sent before the order.
    #[default]
    Initial,
    /// Quote after the order, with actual costs.
    Final,
}

impl FromStr for CalculationMode {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INITIAL" => Ok(CalculationMode::Initial),
            "FINAL" => Ok(CalculationMode::Final),
            _ => Err(QuoteError::UnknownMode {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for CalculationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalculationMode::Initial => write!(f, "INITIAL"),
            CalculationMode::Final => write!(f, "FINAL"),
        }
    }
}

/// A postal address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Company or person name.
    pub name: String,
    /// Street and number.
    pub street: String,
    /// Postal code.
    pub zip: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
}

/// Descriptive project data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectMeta {
    /// Project / offer number.
    pub project_number: String,
    /// Responsible sales person.
    pub sales_person: String,
    /// Free-text notes.
    pub notes: String,
}

/// A full calculation snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationData {
    /// Customer address.
    pub client_address: Address,
    /// Delivery site address.
    pub delivery_address: Address,
    /// Project metadata.
    pub meta: ProjectMeta,
    /// Supplier offers.
    pub suppliers: Vec<Supplier>,
    /// Transport entries.
    pub transport: Vec<TransportItem>,
    /// Incidental costs.
    pub other_costs: Vec<OtherCostItem>,
    /// Installation section.
    pub installation: InstallationData,
    /// Number of nameplates, priced at a fixed PLN rate.
    #[serde(deserialize_with = "lenient_f64")]
    pub nameplate_qty: f64,
    /// Named what-if variants.
    pub variants: Vec<Variant>,
}

impl CalculationData {
    /// An empty calculation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if the calculation has no cost-bearing entries.
    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
            && self.transport.is_empty()
            && self.other_costs.is_empty()
            && self.installation.stages.is_empty()
            && self.installation.custom_items.is_empty()
            && self.installation.other_installation_costs == 0.0
            && self.nameplate_qty == 0.0
    }

    /// Find a variant by id.
    pub fn find_variant(&self, variant_id: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }
}

/// Everything the editor persists for one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    /// Initial quote snapshot.
    #[serde(rename = "initial")]
    pub initial_quote: CalculationData,
    /// Final quote snapshot.
    #[serde(rename = "final")]
    pub final_quote: CalculationData,
    /// Active snapshot.
    pub mode: CalculationMode,
    /// PLN per 1 EUR.
    #[serde(deserialize_with = "lenient_f64")]
    pub exchange_rate: f64,
    /// Currency of the quote.
    pub offer_currency: Currency,
    /// Target margin in percent.
    #[serde(deserialize_with = "lenient_f64")]
    pub target_margin: f64,
    /// Manually fixed selling price; overrides the target margin.
    #[serde(deserialize_with = "lenient_opt_f64")]
    pub manual_price: Option<f64>,
    /// Project-wide settings.
    pub global_settings: GlobalSettings,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            initial_quote: CalculationData::empty(),
            final_quote: CalculationData::empty(),
            mode: CalculationMode::Initial,
            exchange_rate: 0.0,
            offer_currency: Currency::Pln,
            target_margin: 0.0,
            manual_price: None,
            global_settings: GlobalSettings::default(),
        }
    }
}

impl AppState {
    /// Wrap a single calculation as the initial snapshot.
    pub fn from_calculation(data: CalculationData) -> Self {
        Self {
            initial_quote: data,
            ..Default::default()
        }
    }

    /// The snapshot selected by `mode`.
    pub fn active(&self) -> &CalculationData {
        match self.mode {
            CalculationMode::Initial => &self.initial_quote,
            CalculationMode::Final => &self.final_quote,
        }
    }

    /// Mutable access to the snapshot selected by `mode`.
    pub fn active_mut(&mut self) -> &mut CalculationData {
        match self.mode {
            CalculationMode::Initial => &mut self.initial_quote,
            CalculationMode::Final => &mut self.final_quote,
        }
    }

    /// Start the final quote from a copy of the initial one.
    pub fn copy_initial_to_final(&mut self) {
        self.final_quote = self.initial_quote.clone();
    }

    /// Costing options derived from the stored settings.
    pub fn cost_options(&self) -> CostOptions {
        CostOptions::new(self.exchange_rate, self.offer_currency)
            .with_mode(self.mode)
            .with_orm_fee_percent(self.global_settings.orm_fee_percent)
            .with_truck_load_capacity(self.global_settings.truck_load_capacity_kg)
            .with_target_margin(self.target_margin)
            .with_manual_price(self.manual_price)
    }

    /// Cost breakdown and price of the active snapshot.
    pub fn calculate(&self) -> ProjectSummary {
        calculate_project_summary(self.active(), &self.cost_options())
    }
}
