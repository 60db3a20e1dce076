//! Cost aggregation and pricing engine.
//!
//! Every function here is a pure read of the data model.

mod currency;
pub mod installation;
mod price;
mod project;
mod supplier;
pub mod transport;

pub use currency::convert;
pub use installation::{
    build_custom_item_tree, calculate_installation_cost, calculate_stage_breakdown,
    calculate_stage_cost, CustomItemNode, InstallationContext, InstallationCost, StageCost,
};
pub use price::{derive_price, margin_for_price, price_for_margin, MarginLevel, PriceSummary};
pub use project::{
    calculate_project_costs, calculate_project_summary, compare_variants, CostBreakdown,
    CostOptions, ProjectSummary, VariantSummary,
};
pub use supplier::{calculate_supplier_cost, SupplierCost};
pub use transport::{calculate_transport_costs, effective_trucks_count, TransportCost};
