//! Lenient conversion of backend JSON into amounts.
//!
//! The reporting backend is not strict about numbers: amounts arrive as JSON
//! numbers, as strings (sometimes with thousands separators), as `null`, or not
//! at all. Everything that does not read as a number becomes zero.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use super::types::LineCategory;

/// Converts a JSON value into an amount, treating anything non-numeric as zero.
#[must_use]
pub fn amount_from_value(value: &Value) -> Decimal {
    match value {
        Value::Number(n) => numeric_text(&n.to_string()),
        Value::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            numeric_text(&cleaned)
        }
        _ => Decimal::ZERO,
    }
}

fn numeric_text(s: &str) -> Decimal {
    parse_decimal(s)
        .or_else(|| out_of_range(s))
        .unwrap_or(Decimal::ZERO)
}

// Finite numbers beyond the Decimal range clamp toward their sign;
// magnitudes below its precision are zero.
fn out_of_range(s: &str) -> Option<Decimal> {
    let value = s.parse::<f64>().ok().filter(|v| v.is_finite())?;
    let clamped = if value.abs() < 1.0 {
        Decimal::ZERO
    } else if value.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    };
    debug!(input = s, %clamped, "Amount outside decimal range");
    Some(clamped)
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Reads the named field of a JSON object as an amount; missing fields are zero.
#[must_use]
pub fn field_amount(object: &Value, field: &str) -> Decimal {
    object.get(field).map_or(Decimal::ZERO, amount_from_value)
}

/// Serde helper: deserializes an amount leniently.
///
/// Use together with `#[serde(default)]` so missing fields are zero as well.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value))
}

/// Serde helper: deserializes a line category, mapping unknown tags to `None`.
pub fn lenient_category<'de, D>(deserializer: D) -> Result<Option<LineCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|s| s.parse().ok()))
}

/// Serde helper: deserializes a string field, accepting numbers and `null`.
///
/// Account codes and JV numbers are sometimes sent as bare numbers.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Serde helper: deserializes an optional string, accepting numbers.
///
/// `null`, empty strings and non-scalar values become `None`.
pub fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Serde helper: deserializes a flag from a bool, `0`/`1`, or a string.
///
/// Anything unrecognized reads as `true`, the default for account flags.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => !amount_from_value(&Value::Number(n)).is_zero(),
        Value::String(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "false" | "0" | "no" | "n" | "inactive"
        ),
        _ => true,
    })
}

/// Serde helper: deserializes a posting date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps; the time part is dropped.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}
