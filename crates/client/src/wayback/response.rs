//! Wayback availability API response types.

use serde::Deserialize;

/// Raw response from the availability endpoint.
///
/// Only `archived_snapshots.closest.url` is read; other fields are ignored
/// whatever their type.
///
/// ```json
/// {"url": "example.com", "archived_snapshots": {"closest": {"url": "http://web.archive.org/web/..."}}}
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityResponse {
    #[serde(default)]
    pub archived_snapshots: Option<ArchivedSnapshots>,
}

/// Snapshot container; empty when nothing is archived.
#[derive(Debug, Default, Deserialize)]
pub struct ArchivedSnapshots {
    #[serde(default)]
    pub closest: Option<ClosestSnapshot>,
}

/// The snapshot closest to the requested time.
#[derive(Debug, Default, Deserialize)]
pub struct ClosestSnapshot {
    #[serde(default)]
    pub url: Option<String>,
}

impl AvailabilityResponse {
    /// Parse a response body.
    ///
    /// Anything other than a JSON object is rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, String> {
        let value: serde_json::Value = serde_json::from_slice(bytes).map_err(|e| format!("invalid JSON: {e}"))?;
        if !value.is_object() {
            return Err("expected a JSON object".to_string());
        }
        serde_json::from_value(value).map_err(|e| format!("unexpected shape: {e}"))
    }

    /// URL of the closest snapshot, if any.
    ///
    /// A missing or null `closest`, an empty `closest` object and an empty
    /// `url` all mean there is no archived copy.
    pub fn closest_url(&self) -> Option<&str> {
        self.archived_snapshots
            .as_ref()
            .and_then(|s| s.closest.as_ref())
            .and_then(|c| c.url.as_deref())
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}
