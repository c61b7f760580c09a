//! Request transport
//!
//! [`Transport`] is the boundary to the HTTP stack: it sends a fully
//! described request and hands back the status and raw body without
//! interpreting either. Dropping the returned future abandons the request.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::{debug, instrument};

use crate::config::OpenLsConfig;
use crate::error::OpenLsError;

/// Everything needed to issue one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    /// Service base URL
    pub base_url: String,
    /// Path relative to the base URL, with leading slash
    pub path: String,
    /// HTTP method
    pub method: Method,
    /// Query parameters in insertion order
    pub parameters: Vec<(String, String)>,
}

impl ServiceRequest {
    /// Absolute URL without query string
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path)
    }

    /// Value of a query parameter
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw response as received from the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

impl ServiceResponse {
    /// Whether the status is in the 2xx range
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends requests to the service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response
    ///
    /// Only connectivity problems are errors; any HTTP status is returned
    /// as a response.
    async fn send(&self, request: &ServiceRequest) -> Result<ServiceResponse, OpenLsError>;
}

/// HTTP transport backed by `reqwest`
pub struct ReqwestTransport {
    client: Client,
    timeout_secs: u64,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Create a new transport
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OpenLsConfig) -> Result<Self, OpenLsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| OpenLsError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }
}

impl ReqwestTransport {
    fn map_error(&self, e: &reqwest::Error) -> OpenLsError {
        if e.is_timeout() {
            OpenLsError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            OpenLsError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self, request), fields(path = %request.path))]
    async fn send(&self, request: &ServiceRequest) -> Result<ServiceResponse, OpenLsError> {
        let url = request.url();
        debug!(%url, "Sending OpenLS request");

        let response = self
            .client
            .request(request.method.clone(), &url)
            .query(&request.parameters)
            .send()
            .await
            .map_err(|e| self.map_error(&e))?;

        let status = response.status().as_u16();
        // The body is decoded lossily, so a failure here is always I/O
        let body = response.text().await.map_err(|e| self.map_error(&e))?;

        debug!(status, bytes = body.len(), "Received OpenLS response");
        Ok(ServiceResponse { status, body })
    }
}
