//! Cache-search archive source.
//!
//! ### Protocol
//!
//! - **Endpoint**: `https://webcache.googleusercontent.com/search`
//! - **Request**: `GET <endpoint>?q=cache:<url>`
//! - **Response**: the cached page as raw HTML on HTTP 200; any other status is
//!   reported as `UpstreamError` with that status. No JSON involved.

use archive_fallback_core::{ArchiveRequest, ArchiveResult, ConfigError, Error};
use reqwest::Client;
use url::Url;

use crate::http::fetch_page;
use crate::source::SourceClient;

/// Cache-search source client.
#[derive(Debug, Clone)]
pub struct GoogleCacheClient {
    http: Client,
    endpoint: Url,
}

impl GoogleCacheClient {
    pub const NAME: &'static str = "google_cache";

    /// Create a client for the given endpoint.
    pub fn new(http: Client, endpoint: &str) -> Result<Self, Error> {
        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::Invalid {
            field: "google_cache_url".into(),
            reason: format!("invalid URL '{endpoint}': {e}"),
        })?;
        Ok(Self { http, endpoint })
    }

    /// Cache-search URL for a target page.
    pub fn cache_url(&self, request: &ArchiveRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &format!("cache:{}", request.as_str()));
        url
    }
}

#[async_trait::async_trait]
impl SourceClient for GoogleCacheClient {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, request: &ArchiveRequest) -> ArchiveResult {
        tracing::debug!(source = Self::NAME, url = %request, "querying cache search");
        fetch_page(&self.http, self.cache_url(request), Self::NAME).await
    }
}
