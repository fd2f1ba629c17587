//! Configuration module
//!
//! Handles CLI configuration: backend URL, token location and polling interval.

use std::path::PathBuf;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend API
    pub api_url: String,

    /// Where the session token is persisted between runs
    pub token_file: PathBuf,

    /// How often to check the status of a running analysis
    pub poll_interval: Duration,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.token_file.as_os_str().is_empty() {
            anyhow::bail!("token_file cannot be empty");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        Ok(())
    }
}

/// Default token location under the user's config directory
pub fn default_token_file() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("code-review").join("token"))
        .unwrap_or_else(|| PathBuf::from(".code-review-token"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: review_client::DEFAULT_API_URL.to_string(),
            token_file: default_token_file(),
            poll_interval: review_client::DEFAULT_POLL_INTERVAL,
        }
    }
}
