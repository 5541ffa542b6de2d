//! Shared types, errors, and configuration for Tally.
//!
//! This crate provides common types used across all other crates:
//! - Pagination types for long report listings
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, OutputConfig, OutputFormat, SourceConfig};
pub use error::{AppError, AppResult};
