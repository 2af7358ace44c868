//! Wayback Machine archive source.
//!
//! ### Protocol
//!
//! - **Availability endpoint**: `http://archive.org/wayback/available?url=<url>`
//! - **Lookup**: on HTTP 200 the body must be a JSON object; the snapshot URL is
//!   read from `archived_snapshots.closest.url`.
//!   - Unparseable body or unexpected shape: `MalformedResponse` (502).
//!   - No snapshot (missing/null/empty `closest`, empty `url`): `NotFound` (404).
//!   - Non-200: `UpstreamError` with that status.
//! - **Snapshot fetch**: a second GET of the snapshot URL; HTTP 200 yields the
//!   page, anything else `UpstreamError` with the second call's status.

pub mod response;

pub use response::{ArchivedSnapshots, AvailabilityResponse, ClosestSnapshot};

use archive_fallback_core::{ArchiveRequest, ArchiveResult, ConfigError, Error};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::http::{fetch_page, send, unavailable};
use crate::source::SourceClient;

/// Wayback Machine source client.
#[derive(Debug, Clone)]
pub struct WaybackMachineClient {
    http: Client,
    endpoint: Url,
}

impl WaybackMachineClient {
    pub const NAME: &'static str = "wayback";

    /// Create a client for the given availability endpoint.
    pub fn new(http: Client, endpoint: &str) -> Result<Self, Error> {
        let endpoint = Url::parse(endpoint).map_err(|e| ConfigError::Invalid {
            field: "wayback_api_url".into(),
            reason: format!("invalid URL '{endpoint}': {e}"),
        })?;
        Ok(Self { http, endpoint })
    }

    /// Availability lookup URL for a target page.
    pub fn availability_url(&self, request: &ArchiveRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("url", request.as_str());
        url
    }

    /// Ask the availability endpoint for the closest snapshot.
    ///
    /// `Ok(None)` means nothing is archived; `Err` carries the classified failure.
    async fn lookup(&self, request: &ArchiveRequest) -> Result<Option<Url>, ArchiveResult> {
        let response = send(self.http.get(self.availability_url(request)).header("Accept", "application/json")).await?;

        let status = response.status();
        tracing::debug!(source = Self::NAME, url = %request, status = status.as_u16(), "availability response");

        if status != StatusCode::OK {
            return Err(ArchiveResult::UpstreamError { status: status.as_u16() });
        }

        let bytes = response.bytes().await.map_err(|e| unavailable(&e))?;
        let availability =
            AvailabilityResponse::from_slice(&bytes).map_err(|reason| ArchiveResult::MalformedResponse { reason })?;

        let Some(closest) = availability.closest_url() else {
            return Ok(None);
        };

        Url::parse(closest).map(Some).map_err(|e| ArchiveResult::MalformedResponse {
            reason: format!("invalid snapshot URL '{closest}': {e}"),
        })
    }
}

#[async_trait::async_trait]
impl SourceClient for WaybackMachineClient {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, request: &ArchiveRequest) -> ArchiveResult {
        let snapshot = match self.lookup(request).await {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::debug!(source = Self::NAME, url = %request, "no archived snapshot");
                return ArchiveResult::NotFound;
            }
            Err(failure) => {
                if let ArchiveResult::MalformedResponse { reason } = &failure {
                    tracing::warn!(source = Self::NAME, url = %request, %reason, "malformed availability response");
                }
                return failure;
            }
        };

        tracing::debug!(source = Self::NAME, url = %request, %snapshot, "fetching snapshot");
        fetch_page(&self.http, snapshot, Self::NAME).await
    }
}
