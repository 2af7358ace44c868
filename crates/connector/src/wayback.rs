//! Archive fallback connector.
//!
//! Decodes the requested URL with the configured client encoding, resolves it
//! against the configured archive sources and, on success, writes the page
//! re-encoded in the client encoding. The sink is written at most once and
//! only with a fully encoded body.

use archive_fallback_client::FallbackResolver;
use archive_fallback_core::{AppConfig, ArchiveRequest, Error, TextEncoding};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::connector::{ConnectTarget, Connector};

/// Connector serving archived copies of pages.
#[derive(Debug, Clone)]
pub struct WaybackConnector {
    resolver: FallbackResolver,
    encoding: TextEncoding,
}

impl WaybackConnector {
    pub const CONNECTION_TYPE: &'static str = "wayback";

    /// Build the connector from validated configuration.
    ///
    /// # Errors
    ///
    /// Fails on missing or invalid configuration, so problems surface at
    /// startup instead of on the first request.
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        config.validate()?;
        let encoding = config.encoding()?;
        let resolver = FallbackResolver::from_config(config)?;

        tracing::info!(encoding = %encoding, sources = ?resolver.source_names(), "archive connector ready");

        Ok(Self::with_resolver(resolver, encoding))
    }

    /// Build the connector around an existing resolver.
    pub fn with_resolver(resolver: FallbackResolver, encoding: TextEncoding) -> Self {
        Self { resolver, encoding }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Look up `raw_url` and write the archived page to `sink`.
    pub async fn handle<W>(&self, sink: &mut W, raw_url: &[u8]) -> Result<bool, Error>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let url = self.encoding.decode(raw_url)?;
        let request = ArchiveRequest::parse(&url)?;

        let Some(body) = self.resolver.resolve(&request).await.into_body() else {
            return Ok(false);
        };

        let bytes = self.encoding.encode(&body)?;
        sink.write_all(&bytes).await?;
        sink.flush().await?;

        tracing::debug!(url = %request, bytes = bytes.len(), "archived page written");
        Ok(true)
    }
}

#[async_trait::async_trait]
impl Connector for WaybackConnector {
    fn connection_type(&self) -> &'static str {
        Self::CONNECTION_TYPE
    }

    async fn connect(
        &self, sink: &mut (dyn AsyncWrite + Unpin + Send), raw_url: &[u8], target: &ConnectTarget,
    ) -> Result<bool, Error> {
        tracing::debug!(host = %target.host, port = target.port, scheme = %target.scheme, method = %target.method, "connect");
        self.handle(sink, raw_url).await
    }
}
