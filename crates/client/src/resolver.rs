//! Fallback resolution across archive sources.
//!
//! Sources are tried one at a time, in priority order. The first `Success`
//! ends the lookup and later sources are never contacted. If every source
//! fails, the last source's result is what the caller sees.
//!
//! Sources are never raced in parallel: a lower-priority source must not be
//! contacted while a higher-priority one might still succeed.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use archive_fallback_core::{AppConfig, ArchiveRequest, ArchiveResult, Error, SourceKind};

use crate::google::GoogleCacheClient;
use crate::http::{HttpConfig, build_http_client};
use crate::source::SourceClient;
use crate::wayback::WaybackMachineClient;

/// Try `sources` in order until one succeeds.
///
/// Returns the first `Success`, or the last source's failure when all fail.
/// An empty source list yields `NotFound`.
pub async fn resolve(request: &ArchiveRequest, sources: &[Arc<dyn SourceClient>]) -> ArchiveResult {
    let start = Instant::now();
    let mut last = ArchiveResult::NotFound;

    for (attempt, source) in sources.iter().enumerate() {
        let result = source.fetch(request).await;

        if result.is_success() {
            tracing::info!(
                source = source.name(),
                attempt = attempt + 1,
                url = %request,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "archived copy found"
            );
            return result;
        }

        tracing::debug!(
            source = source.name(),
            attempt = attempt + 1,
            url = %request,
            result = %result.status(),
            status_code = result.status_code(),
            "source failed, trying next"
        );
        last = result;
    }

    tracing::info!(
        url = %request,
        attempts = sources.len(),
        result = %last.status(),
        "no archived copy found"
    );
    last
}

/// Ordered set of archive sources.
#[derive(Clone)]
pub struct FallbackResolver {
    sources: Vec<Arc<dyn SourceClient>>,
}

impl FallbackResolver {
    /// Create a resolver over sources in priority order.
    pub fn new(sources: Vec<Arc<dyn SourceClient>>) -> Self {
        Self { sources }
    }

    /// Build the configured sources, in configured order, sharing one HTTP client.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let http = build_http_client(&HttpConfig::from(config))?;

        let sources = config
            .sources
            .iter()
            .map(|kind| -> Result<Arc<dyn SourceClient>, Error> {
                let source: Arc<dyn SourceClient> = match kind {
                    SourceKind::GoogleCache => Arc::new(GoogleCacheClient::new(http.clone(), &config.google_cache_url)?),
                    SourceKind::Wayback => Arc::new(WaybackMachineClient::new(http.clone(), &config.wayback_api_url)?),
                };
                Ok(source)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(sources))
    }

    /// Source names in attempt order.
    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub async fn resolve(&self, request: &ArchiveRequest) -> ArchiveResult {
        resolve(request, &self.sources).await
    }
}

impl fmt::Debug for FallbackResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackResolver")
            .field("sources", &self.source_names())
            .finish()
    }
}
