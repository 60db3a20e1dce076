//! Currency conversion.

use crate::config::safe_div::div_or_zero;
use crate::model::Currency;

/// Convert `amount` between currencies.
///
/// `exchange_rate` is the PLN price of 1 EUR. Converting PLN to EUR at a zero
/// rate yields 0 rather than infinity.
pub fn convert(amount: f64, from: Currency, to: Currency, exchange_rate: f64) -> f64 {
    match (from, to) {
        (Currency::Pln, Currency::Pln) | (Currency::Eur, Currency::Eur) => amount,
        (Currency::Eur, Currency::Pln) => amount * exchange_rate,
        (Currency::Pln, Currency::Eur) => {
            if exchange_rate == 0.0 && amount != 0.0 {
                tracing::warn!(
                    "Exchange rate is zero, PLN amount {} converted to 0 EUR",
                    amount
                );
            }
            div_or_zero(amount, exchange_rate)
        }
    }
}
