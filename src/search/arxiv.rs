//! arXiv API Client
//!
//! Thin wrapper around a shared `reqwest::Client` that knows the upstream
//! query endpoint. The response payload (an Atom feed) is never parsed here,
//! only relayed.

use std::time::Duration;

use reqwest::{header::CONTENT_TYPE, Client, Url};
use tracing::{debug, error, info};

use crate::config::UpstreamConfig;
use crate::types::{AppError, AppResult};

/// Body and content type of a successful upstream call.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone)]
pub struct ArxivClient {
    client: Client,
    base_url: String,
}

impl ArxivClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> AppResult<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full upstream URL for a query-string.
    ///
    /// Parsing percent-encodes characters that cannot appear in a query
    /// (spaces, quotes); everything else is kept as built.
    pub fn upstream_url(&self, query: &str) -> AppResult<Url> {
        let raw = format!("{}?{}", self.base_url, query);
        Url::parse(&raw).map_err(|e| {
            AppError::Internal(format!("Invalid upstream URL {}: {}", raw, e))
        })
    }

    /// Issue the GET and return the body untouched.
    ///
    /// Transport errors, timeouts and non-success statuses all surface as
    /// `UpstreamFailure`.
    pub async fn fetch(&self, url: Url) -> AppResult<UpstreamResponse> {
        info!(url = %url, "Querying arXiv");

        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            error!(error = %e, url = %url, "Network error talking to arXiv");
            AppError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(status = %status, url = %url, "arXiv returned an error status");
            return Err(AppError::UpstreamFailure(format!(
                "arXiv responded with status {}",
                status
            )));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Failed to read arXiv response body");
            AppError::from(e)
        })?;

        debug!(bytes = body.len(), "arXiv response received");
        Ok(UpstreamResponse { content_type, body })
    }
}
