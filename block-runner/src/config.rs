//! Runner configuration
//!
//! Defines the credential, transport timeout and polling defaults used when
//! executing a batch. The CLI fills it from flags and `BLOCK_*` variables.

use block_client::{Credentials, DEFAULT_BASE_URL};
use block_core::domain::polling::PollConfig;
use std::time::Duration;

/// Runner configuration
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Secret API key for the Block API
    pub api_key: String,

    /// Block API base URL (e.g., "https://api.useblock.tech")
    pub base_url: String,

    /// Upper bound for a single HTTP call, independent of the poll timeout
    pub request_timeout: Duration,

    /// Polling used when an item does not override it
    pub poll: PollConfig,
}

impl RunnerConfig {
    /// Creates a new configuration with defaults
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            poll: PollConfig::default(),
        }
    }

    /// Credentials for the Block client
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_key.clone()).with_base_url(self.base_url.clone())
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("api_key cannot be empty");
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!("base_url must start with http:// or https://");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        if self.poll.timeout.is_zero() {
            anyhow::bail!("poll timeout must be greater than 0");
        }

        Ok(())
    }
}
