//! Block HTTP Client
//!
//! A small, type-safe HTTP client for the Block scheduling API.
//!
//! Every request is authenticated with a bearer token derived from the stored
//! API key and bounded by a transport-level timeout, so a single hung call
//! cannot silently eat a caller's polling budget.
//!
//! # Example
//!
//! ```no_run
//! use block_client::{BlockClient, Credentials};
//! use block_core::domain::action::ActionType;
//! use block_core::dto::action::ActionRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BlockClient::new(Credentials::new("sk_live_..."))?;
//!
//!     let response = client
//!         .submit_action(&ActionRequest::new(
//!             ActionType::GetAvailability,
//!             "conn_123",
//!             serde_json::json!({ "startDate": "2025-03-01", "endDate": "2025-03-07" }),
//!         ))
//!         .await?;
//!
//!     println!("Submitted job: {:?}", response.job_id());
//!     Ok(())
//! }
//! ```

mod actions;
mod connections;
pub mod error;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Production endpoint of the Block API
pub const DEFAULT_BASE_URL: &str = "https://api.useblock.tech";

/// Per-request timeout applied by [`BlockClient::new`]
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Stored API credential
#[derive(Clone)]
pub struct Credentials {
    /// Secret API key, sent as a bearer token
    pub api_key: String,
    /// Base URL of the API (e.g., "https://api.useblock.tech")
    pub base_url: String,
}

impl Credentials {
    /// Credentials against the production endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL. An empty value keeps the production endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        if !base_url.trim().is_empty() {
            self.base_url = base_url;
        }
        self
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// HTTP client for the Block API
///
/// Methods are organized into logical groups:
/// - Actions: submitting a typed action against a connection
/// - Jobs: reading the status of a submitted job
/// - Connections: verifying the credential
#[derive(Clone)]
pub struct BlockClient {
    /// Base URL without trailing slash
    base_url: String,
    /// Secret API key
    api_key: String,
    /// HTTP client instance
    client: Client,
}

impl std::fmt::Debug for BlockClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl BlockClient {
    /// Create a new client with the default request timeout
    ///
    /// # Example
    /// ```
    /// use block_client::{BlockClient, Credentials};
    ///
    /// let client = BlockClient::new(Credentials::new("sk_test")).unwrap();
    /// assert_eq!(client.base_url(), "https://api.useblock.tech");
    /// ```
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_timeout(credentials, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Create a new client bounding every request by `timeout`
    pub fn with_timeout(credentials: Credentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self::with_client(credentials, client))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(credentials: Credentials, client: Client) -> Self {
        Self {
            base_url: credentials.base_url.trim_end_matches('/').to_string(),
            api_key: credentials.api_key,
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Every call carries the bearer token and asks for JSON
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .bearer_auth(&self.api_key)
            .header(ACCEPT, "application/json")
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.get(self.url(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.post(self.url(path)))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BlockClient::new(Credentials::new("sk_test")).unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let credentials = Credentials::new("sk_test").with_base_url("http://localhost:8080/");
        let client = BlockClient::new(credentials).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("/v1/jobs/abc"), "http://localhost:8080/v1/jobs/abc");
    }

    #[test]
    fn test_empty_base_url_falls_back_to_default() {
        let credentials = Credentials::new("sk_test").with_base_url("  ");
        assert_eq!(credentials.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_with_custom_client() {
        let client = BlockClient::with_client(
            Credentials::new("sk_test").with_base_url("http://localhost:8080"),
            Client::new(),
        );
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_requests_carry_auth_and_accept() {
        let client = BlockClient::new(
            Credentials::new("sk_test").with_base_url("http://localhost:8080"),
        )
        .unwrap();

        let request = client.get("/v1/connections").build().unwrap();
        assert_eq!(request.method(), &reqwest::Method::GET);
        assert_eq!(request.url().as_str(), "http://localhost:8080/v1/connections");
        assert_eq!(request.headers()[reqwest::header::AUTHORIZATION], "Bearer sk_test");
        assert_eq!(request.headers()[ACCEPT], "application/json");

        let request = client.post("/v1/actions").build().unwrap();
        assert_eq!(request.method(), &reqwest::Method::POST);
        assert_eq!(request.headers()[reqwest::header::AUTHORIZATION], "Bearer sk_test");
        assert_eq!(request.headers()[ACCEPT], "application/json");
    }

    #[test]
    fn test_client_debug_hides_key() {
        let client = BlockClient::new(Credentials::new("sk_live_secret")).unwrap();
        assert!(!format!("{:?}", client).contains("sk_live_secret"));
    }

    #[test]
    fn test_credentials_debug_redacts_key() {
        let rendered = format!("{:?}", Credentials::new("sk_live_secret"));
        assert!(!rendered.contains("sk_live_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
