//! HTTP plumbing shared by archive sources.
//!
//! ### Client
//! - One `reqwest::Client` per resolver, shared by every source (connection pool).
//! - Every round-trip is bounded by the configured timeout.
//! - Max redirects: 5 (configurable)
//!
//! ### Classification
//! - Transport failures become `ArchiveResult::Unavailable`, never errors.
//! - A page fetch succeeds only on HTTP 200; any other status is an
//!   `ArchiveResult::UpstreamError` carrying that status.

use std::time::{Duration, Instant};

use archive_fallback_core::{AppConfig, ArchiveResult, Error};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use url::Url;

/// Configuration for the shared HTTP client.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// User agent string (default: "archive-fallback/0.1")
    pub user_agent: String,

    /// Per-request timeout (default: 10s)
    pub timeout: Duration,

    /// Maximum number of redirects to follow (default: 5)
    pub max_redirects: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { user_agent: "archive-fallback/0.1".to_string(), timeout: Duration::from_secs(10), max_redirects: 5 }
    }
}

impl From<&AppConfig> for HttpConfig {
    fn from(config: &AppConfig) -> Self {
        Self { user_agent: config.user_agent.clone(), timeout: config.timeout(), max_redirects: config.max_redirects }
    }
}

/// Build the HTTP client used by archive sources.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .use_rustls_tls()
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()
        .map_err(|e| Error::HttpClient(format!("failed to build HTTP client: {e}")))
}

/// Classify a transport-level failure.
pub(crate) fn unavailable(err: &reqwest::Error) -> ArchiveResult {
    ArchiveResult::Unavailable { reason: err.to_string(), timed_out: err.is_timeout() }
}

/// Send a request, classifying transport failures.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, ArchiveResult> {
    request.send().await.map_err(|e| unavailable(&e))
}

/// GET a page and classify the outcome.
///
/// HTTP 200 yields the body text (decoded per the response charset);
/// anything else yields `UpstreamError` with the response status.
pub(crate) async fn fetch_page(http: &Client, url: Url, source: &'static str) -> ArchiveResult {
    let start = Instant::now();
    let request = http
        .get(url.clone())
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8");

    let response = match send(request).await {
        Ok(response) => response,
        Err(unavailable) => {
            tracing::debug!(source, %url, result = %unavailable.status(), "page request failed");
            return unavailable;
        }
    };

    let status = response.status();
    if status != StatusCode::OK {
        tracing::debug!(source, %url, status = status.as_u16(), "page request returned non-200");
        return ArchiveResult::UpstreamError { status: status.as_u16() };
    }

    match response.text().await {
        Ok(body) => {
            tracing::debug!(source, %url, bytes = body.len(), elapsed_ms = start.elapsed().as_millis() as u64, "fetched page");
            ArchiveResult::Success { body }
        }
        Err(e) => unavailable(&e),
    }
}
