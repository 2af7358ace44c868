//! Archive source abstraction.

use archive_fallback_core::{ArchiveRequest, ArchiveResult};

/// One archive backend.
///
/// `fetch` never fails: every outcome, including transport failures, is
/// classified into an [`ArchiveResult`]. Implementations do not retry.
#[async_trait::async_trait]
pub trait SourceClient: Send + Sync {
    /// Stable source name used in logs.
    fn name(&self) -> &'static str;

    /// Look up the archived copy of the requested page.
    async fn fetch(&self, request: &ArchiveRequest) -> ArchiveResult;
}
