//! quote-calc - CLI tool to cost warehouse-equipment quote projects.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use quote_core::actions::apply_variant_by_id;
use quote_core::pricing::{calculate_project_summary, compare_variants};
use quote_core::{
    generator::format_amount, load_project_file, render_report, validate_calculation,
    CalculationMode, Currency,
};

/// Cost a quote project and derive its selling price.
#[derive(Parser, Debug)]
#[command(name = "quote-calc")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input project JSON file path
    #[arg(short, long)]
    input: PathBuf,

    /// Output file for the report (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Snapshot to cost (INITIAL or FINAL)
    #[arg(short, long)]
    mode: Option<CalculationMode>,

    /// Exchange rate override (PLN per 1 EUR)
    #[arg(short, long, value_parser = parse_finite)]
    rate: Option<f64>,

    /// Offer currency override (PLN or EUR)
    #[arg(short, long)]
    currency: Option<Currency>,

    /// Target margin override in percent
    #[arg(long, value_parser = parse_finite)]
    margin: Option<f64>,

    /// Fixed selling price
    #[arg(long, value_parser = parse_finite)]
    manual_price: Option<f64>,

    /// ORM service fee override in percent
    #[arg(long, value_parser = parse_finite)]
    orm_fee: Option<f64>,

    /// Cost the project with a variant applied
    #[arg(long)]
    variant: Option<String>,

    /// List every variant's total next to the base calculation
    #[arg(long)]
    compare_variants: bool,

    /// Validate only, don't cost
    #[arg(long)]
    validate: bool,

    /// Output the summary as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Parse a numeric flag, rejecting NaN and infinities.
fn parse_finite(raw: &str) -> std::result::Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{}' is not a finite number", raw))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Processing: {}", args.input.display());

    let mut state = load_project_file(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    // Command line overrides
    if let Some(mode) = args.mode {
        state.mode = mode;
    }
    if let Some(rate) = args.rate {
        state.exchange_rate = rate;
    }
    if let Some(currency) = args.currency {
        state.offer_currency = currency;
    }
    if let Some(margin) = args.margin {
        state.target_margin = margin;
    }
    if args.manual_price.is_some() {
        state.manual_price = args.manual_price;
    }
    if let Some(fee) = args.orm_fee {
        state.global_settings.orm_fee_percent = fee;
    }

    if state.active().is_empty() {
        warn!("The {} snapshot is empty", state.mode);
    }

    // Validate
    let validation =
        validate_calculation(state.active(), state.exchange_rate, state.offer_currency);

    for warning in &validation.warnings {
        warn!("{}", warning);
    }

    for err in &validation.errors {
        error!("{}", err);
    }

    if args.validate {
        if !validation.passed {
            anyhow::bail!("Validation failed");
        }
        info!("Validation passed");
        return Ok(());
    }

    let options = state.cost_options();

    if args.compare_variants {
        let base = state.calculate();
        println!("{:<24}{:>14}{:>14}", "Variant", "Total", "Price");
        println!(
            "{:<24}{:>14}{:>14}",
            "(base)",
            format_amount(base.breakdown.total),
            format_amount(base.price.selling_price)
        );
        for variant in compare_variants(state.active(), &options) {
            println!(
                "{:<24}{:>14}{:>14}",
                variant.name,
                format_amount(variant.summary.breakdown.total),
                format_amount(variant.summary.price.selling_price)
            );
        }
        return Ok(());
    }

    let summary = match &args.variant {
        Some(variant_id) => {
            let data = apply_variant_by_id(state.active(), variant_id)
                .with_context(|| format!("Failed to apply variant {}", variant_id))?;
            info!("Applied variant: {}", variant_id);
            calculate_project_summary(&data, &options)
        }
        None => state.calculate(),
    };

    let rendered = if args.json {
        format!("{}\n", serde_json::to_string_pretty(&summary)?)
    } else {
        render_report(&state, &summary)
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Generated: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
