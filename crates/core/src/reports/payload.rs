//! Extraction of report rows from backend responses.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ReportError;

/// Returns the row array of a payload.
///
/// Accepts a bare array or an envelope object with a `data` array.
pub fn rows(payload: &Value) -> Result<&[Value], ReportError> {
    match payload {
        Value::Array(rows) => Ok(rows.as_slice()),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(rows)) => Ok(rows.as_slice()),
            _ => Err(ReportError::UnexpectedPayload("object without a data array")),
        },
        Value::Null => Err(ReportError::UnexpectedPayload("null")),
        Value::Bool(_) => Err(ReportError::UnexpectedPayload("boolean")),
        Value::Number(_) => Err(ReportError::UnexpectedPayload("number")),
        Value::String(_) => Err(ReportError::UnexpectedPayload("string")),
    }
}

/// Deserializes every row of a payload into `T`.
pub fn parse_rows<T: DeserializeOwned>(payload: &Value) -> Result<Vec<T>, ReportError> {
    rows(payload)?
        .iter()
        .enumerate()
        .map(|(index, row)| {
            T::deserialize(row).map_err(|e| ReportError::InvalidRow {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}
