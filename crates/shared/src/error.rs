//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Requested report or resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input (arguments, filters, date ranges).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Report source (file or REST endpoint) failed.
    #[error("Source error: {0}")]
    Source(String),

    /// Report could not be rendered or written.
    #[error("Render error: {0}")]
    Render(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    ///
    /// Codes follow the BSD `sysexits.h` convention.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 64,
            Self::NotFound(_) => 66,
            Self::Source(_) => 69,
            Self::Internal(_) => 70,
            Self::Render(_) => 74,
            Self::Config(_) => 78,
        }
    }

    /// Returns the stable error code used in structured logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Source(_) => "SOURCE_ERROR",
            Self::Render(_) => "RENDER_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
