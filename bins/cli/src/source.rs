//! Report JSON sources: a local file or a backend endpoint.

use std::path::PathBuf;
use std::time::Duration;

use serde_json::Value;
use tally_shared::{AppError, AppResult, SourceConfig};
use tracing::{debug, info};

/// Where the report rows come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// JSON file on disk.
    File(PathBuf),
    /// HTTP GET endpoint returning JSON.
    Url(String),
}

impl Source {
    /// Picks the source: explicit file, explicit URL, then `base_url` + endpoint.
    pub fn resolve(
        input: Option<PathBuf>,
        url: Option<String>,
        endpoint: &str,
        config: &SourceConfig,
    ) -> AppResult<Self> {
        if let Some(path) = input {
            return Ok(Self::File(path));
        }
        if let Some(url) = url {
            return Ok(Self::Url(url));
        }
        match config.base_url.as_deref() {
            Some(base) => Ok(Self::Url(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                endpoint.trim_start_matches('/')
            ))),
            None => Err(AppError::Validation(
                "no --input or --url given and source.base_url is not configured".to_string(),
            )),
        }
    }

    /// Loads and parses the JSON payload.
    pub async fn fetch(&self, config: &SourceConfig) -> AppResult<Value> {
        match self {
            Self::File(path) => {
                debug!(path = %path.display(), "Reading report JSON");
                let text = tokio::fs::read_to_string(path).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        AppError::NotFound(path.display().to_string())
                    } else {
                        AppError::Source(format!("{}: {e}", path.display()))
                    }
                })?;
                serde_json::from_str(&text)
                    .map_err(|e| AppError::Source(format!("{}: invalid JSON: {e}", path.display())))
            }
            Self::Url(url) => {
                info!(%url, timeout_secs = config.timeout_secs, "Fetching report JSON");
                let client = reqwest::Client::builder()
                    .timeout(Duration::from_secs(config.timeout_secs))
                    .build()
                    .map_err(|e| AppError::Internal(e.to_string()))?;

                let response = client
                    .get(url)
                    .send()
                    .await
                    .map_err(|e| AppError::Source(format!("{url}: {e}")))?;

                if response.status() == reqwest::StatusCode::NOT_FOUND {
                    return Err(AppError::NotFound(url.clone()));
                }

                response
                    .error_for_status()
                    .map_err(|e| AppError::Source(format!("{url}: {e}")))?
                    .json::<Value>()
                    .await
                    .map_err(|e| AppError::Source(format!("{url}: invalid JSON: {e}")))
            }
        }
    }
}
