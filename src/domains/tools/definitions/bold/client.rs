//! API Client for the BOLD public REST API.
//!
//! One client is built at startup from [`BoldApiConfig`] and shared by every
//! tool call; it holds no mutable state, so concurrent calls need no
//! coordination. Each search is a single GET with the configured timeout -
//! no retries, the caller surfaces failures as-is.

use std::fmt;
use std::time::Duration;

use tracing::debug;
use url::Url;

use super::error::{SearchError, SearchResult};
use super::query::SearchQuery;
use crate::core::config::BoldApiConfig;
use crate::core::error::{Error, Result};

/// The two BOLD search endpoints this server fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Specimen metadata only.
    Specimen,
    /// Specimen metadata combined with sequence data.
    Combined,
}

impl Endpoint {
    /// Path segment under the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Specimen => "specimen",
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// HTTP client for the BOLD API.
pub struct BoldClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BoldClient {
    /// Build a client from configuration.
    ///
    /// Fails at startup on an unparsable base URL; nothing network-facing
    /// happens here.
    pub fn new(config: &BoldApiConfig) -> Result<Self> {
        let mut base = config.base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base).map_err(|e| {
            Error::config(format!("invalid BOLD base URL '{}': {e}", config.base_url))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("bold-mcp-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Perform one search request and return the raw response body.
    ///
    /// HTTP 2xx yields the body; everything else maps onto the search error
    /// taxonomy (timeout/connect failures -> transport, other statuses ->
    /// upstream with the status and a body excerpt).
    pub async fn fetch(&self, endpoint: Endpoint, query: &SearchQuery) -> SearchResult<String> {
        let url = self
            .base_url
            .join(endpoint.path())
            .map_err(|e| SearchError::transport(format!("could not build request URL: {e}")))?;

        debug!(%url, query = %query.encode(), "querying BOLD {endpoint} endpoint");

        let response = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::transport(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(SearchError::upstream(status.as_u16(), &body));
        }
        Ok(body)
    }
}

fn classify_transport_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::transport(format!(
            "request timed out ({err}); narrowing the search to fewer specimens may help"
        ))
    } else if err.is_connect() {
        SearchError::transport(format!("could not connect to BOLD: {err}"))
    } else {
        SearchError::transport(err.to_string())
    }
}
