//! HTTP client for the OLX search API using wreq for TLS fingerprint emulation.

use crate::config::Config;
use crate::olx::query::SearchQuery;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use wreq::Client;
use wreq_util::Emulation;

/// Raw HTTP response for one search page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub status: u16,
    pub body: String,
}

impl SearchResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Trait for fetching search pages - enables mocking for tests.
///
/// Implementations return `Err` only for transport failures; any HTTP status
/// is reported through [`SearchResponse::status`].
#[async_trait]
pub trait OlxSearch: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse>;
}

/// OLX HTTP client with Chrome browser impersonation.
pub struct OlxClient {
    client: Client,
    endpoint: String,
}

impl OlxClient {
    /// Creates a new OLX client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { client, endpoint: config.search_endpoint() })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url_for(&self, query: &SearchQuery) -> String {
        format!("{}?{}", self.endpoint, query.to_query_string())
    }
}

#[async_trait]
impl OlxSearch for OlxClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let url = self.url_for(query);
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .emulation(Emulation::Chrome131)
            .header("Accept", "application/json, text/plain, */*")
            .header("Accept-Language", "en-IN,en;q=0.9")
            .header("Sec-Fetch-Dest", "empty")
            .header("Sec-Fetch-Mode", "cors")
            .header("Sec-Fetch-Site", "same-origin")
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status().as_u16();
        debug!("Response status: {}", status);

        let body = response.text().await.context("Failed to read response body")?;

        Ok(SearchResponse { status, body })
    }
}
