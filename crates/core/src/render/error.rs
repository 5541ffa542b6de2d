//! Render error types.

use thiserror::Error;

/// Errors raised while rendering a report table.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A row does not have one cell per header.
    #[error("Row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        /// Zero-based row index.
        row: usize,
        /// Number of headers.
        expected: usize,
        /// Number of cells in the row.
        got: usize,
    },

    /// The output encoder failed.
    #[error("Failed to encode {format} output: {message}")]
    Encode {
        /// Output format name.
        format: &'static str,
        /// Encoder error message.
        message: String,
    },
}
