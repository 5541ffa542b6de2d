//! Core business logic for Tally.
//!
//! This crate contains pure report logic with ZERO network or file dependencies.
//! Report types, variance rules, and aggregation live here.
//!
//! # Modules
//!
//! - `reports` - Variance calculations and report assembly
//! - `render` - Report tables and the `Renderer` capability

pub mod render;
pub mod reports;
