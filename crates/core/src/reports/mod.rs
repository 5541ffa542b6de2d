//! Financial report calculation and assembly.
//!
//! This module provides pure business logic for the reports:
//! - Report totals and variance percentages
//! - Profit & Loss
//! - Assets Schedule
//! - General Ledger
//! - Chart of Accounts

pub mod calculator;
pub mod coerce;
pub mod error;
pub mod payload;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use calculator::{ReportCalculator, VARIANCE_SENTINEL};
pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
