//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report assembly.
///
/// The calculations themselves never fail; these cover malformed payloads and
/// invalid filters.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Payload is neither an array nor an object with a `data` array.
    #[error("Unexpected payload shape: expected an array of rows, got {0}")]
    UnexpectedPayload(&'static str),

    /// A row could not be read.
    #[error("Invalid row at index {index}: {message}")]
    InvalidRow {
        /// Zero-based row index.
        index: usize,
        /// Deserialization error message.
        message: String,
    },
}
