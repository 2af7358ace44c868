//! Unified error types for archive-fallback.
//!
//! Source failures are not errors: they are classified as [`crate::ArchiveResult`]
//! values and recovered by the resolver. The variants here are the failures that
//! abort a whole connector call.

use crate::config::ConfigError;

/// Call-level errors surfaced to the connector's host.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Inbound URL bytes are not valid in the configured encoding.
    #[error("INPUT_DECODE: {0}")]
    InputDecode(String),

    /// Decoded URL is not an absolute http(s) URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Page body contains characters the configured encoding cannot represent.
    #[error("OUTPUT_ENCODE: {0}")]
    OutputEncode(String),

    /// Writing the page body to the output sink failed.
    #[error("SINK_WRITE: {0}")]
    SinkWrite(#[from] std::io::Error),

    /// Missing or invalid configuration.
    #[error("CONFIG: {0}")]
    Config(#[from] ConfigError),

    /// The shared HTTP client could not be built.
    #[error("HTTP_CLIENT: {0}")]
    HttpClient(String),
}
