//! Plain-text cost report.

use std::fmt;

use crate::config::float_cmp::approx_zero;
use crate::model::AppState;
use crate::pricing::ProjectSummary;

const LABEL_WIDTH: usize = 22;
const AMOUNT_WIDTH: usize = 14;

/// Format a money amount with two decimals.
pub fn format_amount(amount: f64) -> String {
    // -0.00 reads oddly in a quote
    let rounded = (amount * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0.00".to_string()
    } else {
        format!("{:.2}", rounded)
    }
}

/// Text report of a costed project.
pub struct Report<'a> {
    state: &'a AppState,
    summary: &'a ProjectSummary,
}

impl<'a> Report<'a> {
    /// Create a report for a state and its costing result.
    pub fn new(state: &'a AppState, summary: &'a ProjectSummary) -> Self {
        Self { state, summary }
    }

    fn line(&self, f: &mut fmt::Formatter<'_>, label: &str, amount: f64) -> fmt::Result {
        writeln!(
            f,
            "{:<lw$}{:>aw$} {}",
            label,
            format_amount(amount),
            self.summary.offer_currency,
            lw = LABEL_WIDTH,
            aw = AMOUNT_WIDTH
        )
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.state.active();
        let breakdown = &self.summary.breakdown;
        let price = &self.summary.price;

        let project = if data.meta.project_number.is_empty() {
            "(unnamed)"
        } else {
            data.meta.project_number.as_str()
        };
        writeln!(f, "Project: {} [{}]", project, self.summary.mode)?;
        writeln!(
            f,
            "Exchange rate: {:.4} PLN/EUR",
            self.state.exchange_rate
        )?;
        writeln!(f)?;

        self.line(f, "Suppliers", breakdown.suppliers)?;
        self.line(f, "  incl. ORM fee", breakdown.orm_fee)?;
        self.line(f, "  incl. markups", breakdown.financing)?;
        self.line(f, "Transport", breakdown.transport)?;
        self.line(f, "Other costs", breakdown.other)?;
        self.line(f, "Installation", breakdown.installation)?;
        writeln!(f, "{}", "-".repeat(LABEL_WIDTH + AMOUNT_WIDTH + 4))?;
        self.line(f, "Total cost", breakdown.total)?;
        if !approx_zero(breakdown.excluded) {
            self.line(f, "Excluded (what-if)", breakdown.excluded)?;
        }
        writeln!(f)?;

        self.line(f, "Selling price", price.selling_price)?;
        self.line(f, "Profit", price.profit)?;
        writeln!(
            f,
            "{:<lw$}{:>aw$} % {}",
            "Margin",
            format_amount(price.margin_percent),
            self.summary.margin_level,
            lw = LABEL_WIDTH,
            aw = AMOUNT_WIDTH
        )?;
        if self.state.manual_price.is_some() {
            writeln!(f, "(manual price)")?;
        }

        Ok(())
    }
}

/// Render the report as a string.
pub fn render_report(state: &AppState, summary: &ProjectSummary) -> String {
    Report::new(state, summary).to_string()
}
