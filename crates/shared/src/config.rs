//! Application configuration management.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Where report JSON is fetched from.
    #[serde(default)]
    pub source: SourceConfig,
    /// How rendered reports are written.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Report source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Base URL of the reporting backend (e.g. `https://erp.example.com/api`).
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Output format for rendered reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values.
    #[default]
    Csv,
    /// Markdown table, used for the print view.
    #[serde(alias = "md", alias = "print")]
    Markdown,
    /// JSON array of row objects.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Markdown => write!(f, "markdown"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "markdown" | "md" | "print" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,
    /// Field delimiter for CSV output.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Decimal places used when formatting amounts.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

fn default_delimiter() -> char {
    ','
}

fn default_decimal_places() -> u32 {
    2
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            delimiter: default_delimiter(),
            decimal_places: default_decimal_places(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
