use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Public endpoint of the Web Search Indexing API.
pub const DEFAULT_ENDPOINT: &str = "https://indexing.googleapis.com";

/// Change signal sent with each URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    #[default]
    UrlUpdated,
    UrlDeleted,
}

impl NotificationType {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationType::UrlUpdated => "URL_UPDATED",
            NotificationType::UrlDeleted => "URL_DELETED",
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_requests_per_window must be at least 1")]
    ZeroRequestBudget,
    #[error("window_secs must be at least 1")]
    ZeroWindow,
    #[error("endpoint must not be empty")]
    EmptyEndpoint,
}

/// Everything a submission run needs, passed in at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmitterConfig {
    pub credential_path: PathBuf,
    pub input_path: PathBuf,
    pub output_failure_path: PathBuf,
    pub pacing_interval_ms: u64,
    pub max_requests_per_window: u32,
    pub window_secs: u64,
    /// Informational; a longer URL list only produces a warning.
    pub daily_quota: u32,
    pub notification_type: NotificationType,
    pub endpoint: String,
    /// Overrides the `token_uri` found in the credential file.
    pub token_uri: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for SubmitterConfig {
    fn default() -> Self {
        Self {
            credential_path: PathBuf::from("service-account.json"),
            input_path: PathBuf::from("sitemap-urls.txt"),
            output_failure_path: PathBuf::from("failed-urls.txt"),
            pacing_interval_ms: 500,
            max_requests_per_window: 600,
            window_secs: 60,
            daily_quota: 200,
            notification_type: NotificationType::UrlUpdated,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token_uri: None,
            request_timeout_secs: 30,
        }
    }
}

impl SubmitterConfig {
    pub fn pacing_interval(&self) -> Duration {
        Duration::from_millis(self.pacing_interval_ms)
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_requests_per_window == 0 {
            return Err(ConfigError::ZeroRequestBudget);
        }
        if self.window_secs == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        Ok(())
    }
}
