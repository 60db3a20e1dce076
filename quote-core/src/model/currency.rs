//! Currencies supported by the quoting engine.

use crate::error::QuoteError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Currency of a monetary amount.
///
/// PLN is the project's base currency (installation is always priced in
/// PLN); EUR is the only foreign currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Polish zloty.
    #[default]
    Pln,
    /// Euro.
    Eur,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Pln => "PLN",
            Currency::Eur => "EUR",
        }
    }
}

impl FromStr for Currency {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PLN" => Ok(Currency::Pln),
            "EUR" => Ok(Currency::Eur),
            _ => Err(QuoteError::UnknownCurrency {
                value: s.to_string(),
            }),
        }
    }
}

/// Codes are read through [`FromStr`], so project files accept any casing and
/// an unknown code reports [`QuoteError::UnknownCurrency`].
impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
