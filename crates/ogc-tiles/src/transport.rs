//! HTTP transport used to fetch tileset and tile matrix set documents.
//!
//! The orchestrator only ever issues GET requests for JSON documents, so the
//! seam is a single `get_json` call. `ReqwestTransport` is the default
//! implementation; tests substitute an in-memory transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::media_types;

/// Errors raised by a transport while fetching a document.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    /// The body was not valid JSON.
    #[error("failed to decode JSON from {url}: {message}")]
    Decode { url: String, message: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl TransportError {
    /// Timeouts, connection failures and 5xx/429 statuses.
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::Request { source, .. } => source.is_timeout() || source.is_connect(),
            TransportError::Status { status, .. } => *status >= 500 || *status == 429,
            TransportError::Decode { .. } | TransportError::Client(_) => false,
        }
    }
}

/// Fetches JSON documents over GET.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Fetch and decode the JSON document at `url`.
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, TransportError>;
}

/// Configuration for the default HTTP transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Whole-request timeout
    pub request_timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            user_agent: format!("ogc-tiles/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    /// Create from environment variables.
    ///
    /// Environment variable: TILES_HTTP_TIMEOUT_SECS (default: 30)
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(secs) = std::env::var("TILES_HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.request_timeout = Duration::from_secs(secs);
        }
        config
    }
}

/// `HttpTransport` backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with the given configuration.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self), fields(url = %url))]
    async fn get_json(&self, url: &Url) -> Result<serde_json::Value, TransportError> {
        debug!("Fetching document");

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, media_types::JSON)
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| TransportError::Decode {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}
