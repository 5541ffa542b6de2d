//! CSV export.

use ::csv::WriterBuilder;
use tally_core::render::{RenderError, ReportTable, Renderer};
use tracing::warn;

/// Renders a table as delimited text: a header row followed by data rows.
///
/// The table title is not part of the output.
pub struct CsvRenderer {
    delimiter: u8,
}

impl CsvRenderer {
    /// Creates a comma-separated renderer.
    #[must_use]
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    /// Creates a renderer with a custom single-byte delimiter.
    ///
    /// Non-ASCII delimiters fall back to a comma.
    #[must_use]
    pub fn with_delimiter(delimiter: char) -> Self {
        match u8::try_from(delimiter) {
            Ok(byte) if byte.is_ascii() => Self { delimiter: byte },
            _ => {
                warn!(%delimiter, "Delimiter is not ASCII, using ','");
                Self::new()
            }
        }
    }
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_error(e: impl std::fmt::Display) -> RenderError {
    RenderError::Encode {
        format: "csv",
        message: e.to_string(),
    }
}

impl Renderer for CsvRenderer {
    fn format_name(&self) -> &'static str {
        "csv"
    }

    fn render(&self, table: &ReportTable) -> Result<String, RenderError> {
        table.validate()?;

        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(vec![]);

        wtr.write_record(&table.headers).map_err(encode_error)?;
        for row in &table.rows {
            wtr.write_record(row).map_err(encode_error)?;
        }

        let data = wtr.into_inner().map_err(encode_error)?;
        String::from_utf8(data).map_err(encode_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> ReportTable {
        let mut table = ReportTable::new("Sample", ["Line", "Actual"]);
        table.push_row(vec!["Sales".to_string(), "1200.00".to_string()]);
        table.push_row(vec!["Rent, Office".to_string(), "300.00".to_string()]);
        table
    }

    #[test]
    fn test_csv_export_empty() {
        let table = ReportTable::new("Empty", ["Line", "Actual"]);
        let result = CsvRenderer::new().render(&table).unwrap();

        // Should have header only
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines, vec!["Line,Actual"]);
    }

    #[test]
    fn test_csv_export_quotes_embedded_delimiters() {
        let result = CsvRenderer::new().render(&sample_table()).unwrap();

        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3); // header + 2 data rows
        assert_eq!(lines[1], "Sales,1200.00");
        assert_eq!(lines[2], "\"Rent, Office\",300.00");
    }

    #[test]
    fn test_csv_custom_delimiter() {
        let result = CsvRenderer::with_delimiter(';')
            .render(&sample_table())
            .unwrap();

        assert!(result.starts_with("Line;Actual\n"));
        assert!(result.contains("Rent, Office;300.00"));
    }

    #[test]
    fn test_csv_non_ascii_delimiter_falls_back() {
        let result = CsvRenderer::with_delimiter('§')
            .render(&sample_table())
            .unwrap();
        assert!(result.starts_with("Line,Actual"));
    }

    #[test]
    fn test_csv_rejects_ragged_table() {
        let mut table = ReportTable::new("Bad", ["A", "B"]);
        table.push_row(vec!["only one".to_string()]);

        assert!(matches!(
            CsvRenderer::new().render(&table),
            Err(RenderError::RaggedRow { .. })
        ));
    }
}
