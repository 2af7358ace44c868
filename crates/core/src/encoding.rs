//! Strict text encoding for the connector's byte boundary.
//!
//! The host hands the connector the requested URL as raw bytes and expects the
//! archived page back as raw bytes, both in the configured client encoding.
//! Decoding and encoding are strict: malformed input and unmappable characters
//! are errors, never silently replaced.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;

use crate::config::ConfigError;
use crate::error::Error;

/// A validated WHATWG encoding usable in both directions.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    encoding: &'static Encoding,
}

impl TextEncoding {
    /// Resolve an encoding label such as `utf-8`, `euc-kr` or `latin1`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the label is unknown or names an encoding
    /// that cannot be used for output (UTF-16 variants and `replacement` encode as
    /// UTF-8, which would break the round trip).
    pub fn from_label(label: &str) -> Result<Self, ConfigError> {
        let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| ConfigError::Invalid {
            field: "client_encoding".into(),
            reason: format!("unknown encoding label '{label}'"),
        })?;

        if encoding.output_encoding() != encoding {
            return Err(ConfigError::Invalid {
                field: "client_encoding".into(),
                reason: format!("{} cannot be used to encode output", encoding.name()),
            });
        }

        Ok(Self { encoding })
    }

    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode inbound bytes.
    ///
    /// No BOM sniffing is performed; the configured encoding is authoritative.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, Error> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| Error::InputDecode(format!("{} bytes are not valid {}", bytes.len(), self.name())))
    }

    /// Encode outbound text.
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, Error> {
        let (bytes, _, had_unmappable) = self.encoding.encode(text);
        if had_unmappable {
            return Err(Error::OutputEncode(format!("text contains characters not representable in {}", self.name())));
        }
        Ok(bytes)
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self { encoding: encoding_rs::UTF_8 }
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
