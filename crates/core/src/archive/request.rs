use std::fmt;

use url::Url;

use crate::error::Error;

/// The page an archive lookup is for.
///
/// Parsing normalizes the target the same way for every source:
/// 1. Trim leading/trailing whitespace
/// 2. Require an absolute `http` or `https` URL
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    url: Url,
}

impl ArchiveRequest {
    /// Parse a decoded target URL.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` for empty input, relative URLs and
    /// non-http(s) schemes.
    pub fn parse(input: &str) -> Result<Self, Error> {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Err(Error::InvalidUrl("empty URL".into()));
        }

        let mut url = Url::parse(trimmed).map_err(|e| Error::InvalidUrl(format!("{trimmed}: {e}")))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => return Err(Error::InvalidUrl(format!("unsupported scheme: {scheme}"))),
        }

        url.set_fragment(None);

        Ok(Self { url })
    }

    /// Target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Target URL as text, as sent to archive backends.
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for ArchiveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
