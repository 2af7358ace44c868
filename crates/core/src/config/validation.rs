//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use std::collections::HashSet;

use thiserror::Error;

use crate::config::AppConfig;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if `client_encoding` is unset, and
    /// `ConfigError::Invalid` if:
    /// - `client_encoding` is not a usable encoding label
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `max_redirects` exceeds 20
    /// - `user_agent` is empty
    /// - an endpoint is not an absolute http(s) URL
    /// - `sources` is empty or lists a source twice
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.encoding()?;

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.max_redirects > 20 {
            return Err(ConfigError::Invalid { field: "max_redirects".into(), reason: "must not exceed 20".into() });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        validate_endpoint("google_cache_url", &self.google_cache_url)?;
        validate_endpoint("wayback_api_url", &self.wayback_api_url)?;

        if self.sources.is_empty() {
            return Err(ConfigError::Invalid { field: "sources".into(), reason: "must list at least one source".into() });
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if !seen.insert(source) {
                return Err(ConfigError::Invalid {
                    field: "sources".into(),
                    reason: format!("{} listed more than once", source.as_str()),
                });
            }
        }

        if self.sources.len() == 1 {
            tracing::warn!(source = self.sources[0].as_str(), "only one archive source configured; no fallback");
        }

        Ok(())
    }
}

fn validate_endpoint(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ConfigError::Invalid { field: field.into(), reason: format!("invalid URL '{value}': {e}") })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::Invalid { field: field.into(), reason: format!("unsupported scheme: {scheme}") }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SourceKind;

    fn valid() -> AppConfig {
        AppConfig { client_encoding: Some("utf-8".into()), ..Default::default() }
    }

    #[test]
    fn test_validate_default_config_with_encoding() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validate_default_config_without_encoding() {
        let result = AppConfig::default().validate();
        assert!(matches!(result, Err(ConfigError::Missing { field, .. }) if field == "client_encoding"));
    }

    #[test]
    fn test_validate_unknown_encoding() {
        let config = AppConfig { client_encoding: Some("bogus".into()), ..Default::default() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "client_encoding"));
    }

    #[test]
    fn test_validate_timeout_too_small() {
        let config = AppConfig { timeout_ms: 50, ..valid() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_timeout_exceeds_limit() {
        let config = AppConfig { timeout_ms: 301_000, ..valid() }; // 5min 1sec
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
    }

    #[test]
    fn test_validate_max_redirects() {
        let config = AppConfig { max_redirects: 21, ..valid() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "max_redirects"));
    }

    #[test]
    fn test_validate_empty_user_agent() {
        let config = AppConfig { user_agent: String::new(), ..valid() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "user_agent"));
    }

    #[test]
    fn test_validate_relative_endpoint() {
        let config = AppConfig { wayback_api_url: "/wayback/available".into(), ..valid() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "wayback_api_url"));
    }

    #[test]
    fn test_validate_endpoint_scheme() {
        let config = AppConfig { google_cache_url: "ftp://cache.example/search".into(), ..valid() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "google_cache_url"));
    }

    #[test]
    fn test_validate_empty_sources() {
        let config = AppConfig { sources: Vec::new(), ..valid() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "sources"));
    }

    #[test]
    fn test_validate_duplicate_sources() {
        let config = AppConfig { sources: vec![SourceKind::Wayback, SourceKind::Wayback], ..valid() };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "sources"));
    }

    #[test]
    fn test_validate_edge_case_values() {
        let config = AppConfig { timeout_ms: 100, max_redirects: 0, sources: vec![SourceKind::Wayback], ..valid() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_max_values() {
        let config = AppConfig { timeout_ms: 300_000, max_redirects: 20, ..valid() };
        assert!(config.validate().is_ok());
    }
}
