//! Review HTTP Client
//!
//! A type-safe HTTP client for the Code Review Assistant backend API.
//!
//! Every request carries the bearer token of the client's [`Session`]. A 401
//! response expires the session (clearing the saved token and notifying the
//! session's listener) and surfaces as [`ClientError::Unauthorized`]; any
//! other failure is returned to the caller unchanged.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use review_client::{ReviewClient, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ReviewClient::new("http://localhost:8000/api/v1", Arc::new(Session::in_memory()));
//!
//!     client.login("ana", "correct-horse").await?;
//!     for project in client.list_projects().await? {
//!         println!("{}: {}", project.id, project.name);
//!     }
//!     Ok(())
//! }
//! ```

mod analysis;
mod auth;
pub mod error;
pub mod poller;
mod projects;
pub mod session;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use poller::{AnalysisPoller, DEFAULT_POLL_INTERVAL, PollHandle};
pub use projects::UploadFile;
pub use session::{FileTokenStore, MemoryTokenStore, Session, SessionListener, TokenStore};

use reqwest::{Client, RequestBuilder, StatusCode, Url};
use review_core::dto::HealthStatus;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default base URL of the backend API, including its version prefix
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api/v1";

/// HTTP client for the review backend API
///
/// Endpoints are organized into groups:
/// - Authentication (register, login, current user)
/// - Project management (create, list, get, delete, upload)
/// - Analysis (run, status, results)
#[derive(Debug, Clone)]
pub struct ReviewClient {
    /// Base URL of the API (e.g., "http://localhost:8000/api/v1")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Credentials shared by every request
    session: Arc<Session>,
}

impl ReviewClient {
    /// Create a new review client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API, including the version prefix
    /// * `session` - The session whose token authorizes requests
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> Self {
        Self::with_client(base_url, Client::new(), session)
    }

    /// Create a new review client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client, session: Arc<Session>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the session used by this client
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Check that the backend is up
    ///
    /// The health endpoint lives at the server root, outside the API prefix.
    pub async fn health(&self) -> Result<HealthStatus> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid API URL: {}", e)))?;
        url.set_path("/health");
        url.set_query(None);

        let response = self.authorized(reqwest::Method::GET, url.as_str()).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Request Builders
    // =============================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.request(reqwest::Method::GET, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.request(reqwest::Method::POST, path)
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.request(reqwest::Method::DELETE, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        self.authorized(method, &self.url(path))
    }

    /// Build a request for an absolute URL, attaching the bearer token when signed in
    fn authorized(&self, method: reqwest::Method, url: &str) -> RequestBuilder {
        debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match self.session.token() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response).await?;
        Ok(())
    }

    /// Turn non-success statuses into errors, expiring the session on 401
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = error::error_message(&error_text);

        if status == StatusCode::UNAUTHORIZED {
            warn!("Request rejected as unauthorized: {}", message);
            self.session.expire();
            return Err(ClientError::Unauthorized(message));
        }

        Err(ClientError::api_error(status.as_u16(), message))
    }
}
