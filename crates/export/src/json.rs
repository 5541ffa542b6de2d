//! JSON export.

use serde_json::{Map, Value};
use tally_core::render::{RenderError, ReportTable, Renderer};

/// Renders a table as a pretty-printed JSON array of objects keyed by header.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Creates a new JSON renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for JsonRenderer {
    fn format_name(&self) -> &'static str {
        "json"
    }

    fn render(&self, table: &ReportTable) -> Result<String, RenderError> {
        table.validate()?;

        let rows: Vec<Value> = table
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = table
                    .headers
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned().map(Value::String))
                    .collect();
                Value::Object(object)
            })
            .collect();

        serde_json::to_string_pretty(&rows).map_err(|e| RenderError::Encode {
            format: "json",
            message: e.to_string(),
        })
    }
}
