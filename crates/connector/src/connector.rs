//! Host-facing connector contract.

use archive_fallback_core::Error;
use tokio::io::AsyncWrite;

/// Extension kind reported to the host for every connector.
pub const CONNECTOR_KIND: &str = "connector";

/// Where the host was originally asked to connect.
///
/// Part of the host's generic connector contract; archive connectors only
/// need the URL and ignore these.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectTarget {
    pub host: String,
    pub port: u16,
    pub scheme: String,
    pub method: String,
}

/// A connector the host proxy can hand requests to.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    /// Extension kind (always `"connector"`).
    fn kind(&self) -> &'static str {
        CONNECTOR_KIND
    }

    /// Connection type the host selects this connector by.
    fn connection_type(&self) -> &'static str;

    /// Serve `raw_url` into `sink`.
    ///
    /// Returns `Ok(true)` if a complete response body was written, `Ok(false)`
    /// if nothing was written. Errors are reserved for bad input, sink failures
    /// and configuration problems.
    async fn connect(
        &self, sink: &mut (dyn AsyncWrite + Unpin + Send), raw_url: &[u8], target: &ConnectTarget,
    ) -> Result<bool, Error>;
}
