//! quote-core - Cost aggregation and pricing engine for warehouse-equipment quotes.
//!
//! This library takes a project's supplier offers, transport, incidental
//! costs and installation stages and turns them into a cost breakdown in the
//! offer currency, then derives a selling price from a target margin or a
//! manually fixed price.
//!
//! # Example
//!
//! ```no_run
//! use quote_core::load_project_file;
//! use std::path::Path;
//!
//! let state = load_project_file(Path::new("project.json")).unwrap();
//! let summary = state.calculate();
//! println!("{}", summary.breakdown.total);
//! ```

pub mod actions;
pub mod config;
pub mod error;
pub mod generator;
pub mod history;
pub mod model;
pub mod parser;
pub mod pricing;
pub mod validation;

// Re-exports for convenience
pub use config::GlobalSettings;
pub use error::{QuoteError, Result};
pub use generator::render_report;
pub use history::History;
pub use model::{AppState, CalculationData, CalculationMode, Currency};
pub use parser::{load_project_file, parse_project_str};
pub use pricing::{
    calculate_project_costs, calculate_stage_cost, convert, derive_price, CostBreakdown,
    CostOptions, MarginLevel, PriceSummary, ProjectSummary,
};
pub use validation::{validate_calculation, ValidationResult};

/// Load a project file and cost its active snapshot.
///
/// This is the main high-level function that performs the full pipeline:
/// 1. Load the project file
/// 2. Validate the active calculation (problems are logged, not fatal)
/// 3. Cost it and derive the selling price
pub fn quote_project_file(input_path: &std::path::Path) -> Result<ProjectSummary> {
    let state = load_project_file(input_path)?;

    let validation =
        validate_calculation(state.active(), state.exchange_rate, state.offer_currency);
    for warning in &validation.warnings {
        tracing::warn!("{}", warning);
    }
    for error in &validation.errors {
        tracing::warn!("{}", error);
    }

    Ok(state.calculate())
}
