//! Lenient numeric deserialization for form-entered values.
//!
//! Project files are written by a form-driven editor, so numeric fields may
//! arrive as numbers, as strings typed by the user (with either `.` or `,`
//! as the decimal separator), or as `null`. Anything that is not a finite
//! number reads as zero.

use serde::de::{self, Deserializer, Visitor};
use std::fmt;

/// Parse a user-entered number, falling back to 0.
pub fn parse_number(raw: &str) -> f64 {
    parse_optional_number(raw).unwrap_or(0.0)
}

/// Parse a user-entered number, returning `None` for blank or invalid text.
pub fn parse_optional_number(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".").replace(' ', "");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Deserialize an `f64` from a number, a numeric string or null.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserializer.deserialize_any(LenientNumber)?.unwrap_or(0.0))
}

/// Deserialize an optional `f64`; null, blank and invalid text become `None`.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(LenientNumber)
}

struct LenientNumber;

impl<'de> Visitor<'de> for LenientNumber {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a number, a numeric string or null")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Some(v).filter(|v| v.is_finite()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Some(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(parse_optional_number(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(LenientNumber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "lenient_f64")]
        value: f64,
        #[serde(default, deserialize_with = "lenient_opt_f64")]
        maybe: Option<f64>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12.5"), 12.5);
        assert_eq!(parse_number(" 12,5 "), 12.5);
        assert_eq!(parse_number("1 250,00"), 1250.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
    }

    #[test]
    fn test_lenient_numbers() {
        assert_eq!(sample(r#"{"value": 3}"#).value, 3.0);
        assert_eq!(sample(r#"{"value": -2.5}"#).value, -2.5);
        assert_eq!(sample(r#"{"value": "4,2"}"#).value, 4.2);
        assert_eq!(sample(r#"{"value": null}"#).value, 0.0);
        assert_eq!(sample(r#"{"value": "x"}"#).value, 0.0);
        assert_eq!(sample(r#"{"value": true}"#).value, 0.0);
        assert_eq!(sample(r#"{}"#).value, 0.0);
    }

    #[test]
    fn test_lenient_optional_numbers() {
        assert_eq!(sample(r#"{"maybe": 900}"#).maybe, Some(900.0));
        assert_eq!(sample(r#"{"maybe": "900"}"#).maybe, Some(900.0));
        assert_eq!(sample(r#"{"maybe": ""}"#).maybe, None);
        assert_eq!(sample(r#"{"maybe": null}"#).maybe, None);
        assert_eq!(sample(r#"{}"#).maybe, None);
    }
}
