//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (ARCHIVE_FALLBACK_*)
//! 2. Bare `CLIENT_ENCODING` environment variable
//! 3. TOML config file (if ARCHIVE_FALLBACK_CONFIG_FILE set)
//! 4. Built-in defaults

use std::path::Path;
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};

use crate::encoding::TextEncoding;

mod validation;

pub use validation::ConfigError;

/// Environment variable naming the TOML config file.
pub const CONFIG_FILE_ENV: &str = "ARCHIVE_FALLBACK_CONFIG_FILE";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ARCHIVE_FALLBACK_";

/// Default cache-search endpoint.
pub const DEFAULT_GOOGLE_CACHE_URL: &str = "https://webcache.googleusercontent.com/search";

/// Default snapshot-availability endpoint.
pub const DEFAULT_WAYBACK_API_URL: &str = "http://archive.org/wayback/available";

/// Archive backends the resolver knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Cache-search service (`?q=cache:<url>`).
    GoogleCache,
    /// Snapshot-availability service (`?url=<url>` then the closest snapshot).
    Wayback,
}

impl SourceKind {
    /// Stable name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::GoogleCache => "google_cache",
            SourceKind::Wayback => "wayback",
        }
    }
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (ARCHIVE_FALLBACK_*)
/// 2. Bare `CLIENT_ENCODING` environment variable
/// 3. TOML config file (if ARCHIVE_FALLBACK_CONFIG_FILE set)
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Encoding label for inbound URL bytes and outbound page bytes.
    ///
    /// Set via CLIENT_ENCODING or ARCHIVE_FALLBACK_CLIENT_ENCODING.
    /// Required: there is no default. Numeric labels such as `866` are
    /// accepted even when the environment provider parses them as integers.
    #[serde(default, deserialize_with = "deserialize_label")]
    pub client_encoding: Option<String>,

    /// HTTP request timeout in milliseconds, applied to every round-trip.
    ///
    /// Set via ARCHIVE_FALLBACK_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for archive requests.
    ///
    /// Set via ARCHIVE_FALLBACK_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Maximum number of redirects followed per round-trip.
    ///
    /// Set via ARCHIVE_FALLBACK_MAX_REDIRECTS environment variable.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Cache-search endpoint.
    ///
    /// Set via ARCHIVE_FALLBACK_GOOGLE_CACHE_URL environment variable.
    #[serde(default = "default_google_cache_url")]
    pub google_cache_url: String,

    /// Snapshot-availability endpoint.
    ///
    /// Set via ARCHIVE_FALLBACK_WAYBACK_API_URL environment variable.
    #[serde(default = "default_wayback_api_url")]
    pub wayback_api_url: String,

    /// Sources in attempt order.
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceKind>,
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    "archive-fallback/0.1".into()
}

fn default_max_redirects() -> usize {
    5
}

fn default_google_cache_url() -> String {
    DEFAULT_GOOGLE_CACHE_URL.into()
}

fn default_wayback_api_url() -> String {
    DEFAULT_WAYBACK_API_URL.into()
}

fn default_sources() -> Vec<SourceKind> {
    vec![SourceKind::GoogleCache, SourceKind::Wayback]
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Label>::deserialize(deserializer)?.map(|label| match label {
        Label::Text(text) => text,
        Label::Number(number) => number.to_string(),
    }))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_encoding: None,
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            max_redirects: default_max_redirects(),
            google_cache_url: default_google_cache_url(),
            wayback_api_url: default_wayback_api_url(),
            sources: default_sources(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// The TOML file is taken from `ARCHIVE_FALLBACK_CONFIG_FILE` when set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading (including a missing `client_encoding`)
    pub fn load() -> Result<Self, ConfigError> {
        let file = std::env::var(CONFIG_FILE_ENV).ok();
        Self::load_from(file.as_deref().map(Path::new))
    }

    /// Load configuration using an explicit TOML file instead of
    /// `ARCHIVE_FALLBACK_CONFIG_FILE`.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_file {
            if !path.is_file() {
                return Err(ConfigError::LoadFailed(format!("config file not found: {}", path.display())));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment
            .merge(Env::raw().only(&["CLIENT_ENCODING"]))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG_FILE"]).split("__"));

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        tracing::debug!(
            encoding = config.client_encoding.as_deref().unwrap_or_default(),
            timeout_ms = config.timeout_ms,
            sources = ?config.sources,
            "configuration loaded"
        );

        Ok(config)
    }

    /// Resolve the configured client encoding.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no encoding is configured and
    /// `ConfigError::Invalid` if the label is unusable.
    pub fn encoding(&self) -> Result<TextEncoding, ConfigError> {
        let label = self.client_encoding.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "client_encoding".into(),
            hint: "Set CLIENT_ENCODING (e.g. utf-8)".into(),
        })?;
        TextEncoding::from_label(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.client_encoding.is_none());
        assert_eq!(config.timeout_ms, 10_000);
        assert_eq!(config.user_agent, "archive-fallback/0.1");
        assert_eq!(config.max_redirects, 5);
        assert_eq!(config.google_cache_url, DEFAULT_GOOGLE_CACHE_URL);
        assert_eq!(config.wayback_api_url, DEFAULT_WAYBACK_API_URL);
        assert_eq!(config.sources, vec![SourceKind::GoogleCache, SourceKind::Wayback]);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(10_000));
    }

    #[test]
    fn test_encoding_missing() {
        let config = AppConfig::default();
        assert!(matches!(config.encoding(), Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_encoding_present() {
        let config = AppConfig { client_encoding: Some("euc-kr".into()), ..Default::default() };
        assert_eq!(config.encoding().unwrap().name(), "EUC-KR");
    }

    #[test]
    fn test_source_kind_names() {
        assert_eq!(SourceKind::GoogleCache.as_str(), "google_cache");
        assert_eq!(SourceKind::Wayback.as_str(), "wayback");
    }

    #[test]
    fn test_load_bare_client_encoding() {
        Jail::expect_with(|jail| {
            jail.set_env("CLIENT_ENCODING", "utf-8");

            let config = AppConfig::load_from(None).map_err(|e| e.to_string())?;
            assert_eq!(config.client_encoding.as_deref(), Some("utf-8"));
            assert_eq!(config.timeout_ms, 10_000);
            Ok(())
        });
    }

    #[test]
    fn test_load_numeric_client_encoding() {
        Jail::expect_with(|jail| {
            jail.set_env("CLIENT_ENCODING", "866");

            let config = AppConfig::load_from(None).map_err(|e| e.to_string())?;
            assert_eq!(config.client_encoding.as_deref(), Some("866"));
            assert_eq!(config.encoding().map_err(|e| e.to_string())?.name(), "IBM866");
            Ok(())
        });
    }

    #[test]
    fn test_load_numeric_client_encoding_from_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("archive.toml", "client_encoding = 866")?;

            let config = AppConfig::load_from(Some(Path::new("archive.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.client_encoding.as_deref(), Some("866"));
            Ok(())
        });
    }

    #[test]
    fn test_load_missing_encoding_fails_at_startup() {
        Jail::expect_with(|_jail| {
            let result = AppConfig::load_from(None);
            assert!(matches!(result, Err(ConfigError::Missing { field, .. }) if field == "client_encoding"));
            Ok(())
        });
    }

    #[test]
    fn test_load_invalid_encoding_fails_at_startup() {
        Jail::expect_with(|jail| {
            jail.set_env("CLIENT_ENCODING", "not-an-encoding");

            let result = AppConfig::load_from(None);
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "client_encoding"));
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_then_env_precedence() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "archive.toml",
                r#"
                    client_encoding = "euc-kr"
                    timeout_ms = 2500
                    sources = ["wayback", "google_cache"]
                "#,
            )?;
            jail.set_env("ARCHIVE_FALLBACK_TIMEOUT_MS", "4000");

            let config = AppConfig::load_from(Some(Path::new("archive.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.client_encoding.as_deref(), Some("euc-kr"));
            assert_eq!(config.timeout_ms, 4000);
            assert_eq!(config.sources, vec![SourceKind::Wayback, SourceKind::GoogleCache]);
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_encoding_overrides_bare() {
        Jail::expect_with(|jail| {
            jail.set_env("CLIENT_ENCODING", "utf-8");
            jail.set_env("ARCHIVE_FALLBACK_CLIENT_ENCODING", "windows-1252");

            let config = AppConfig::load_from(None).map_err(|e| e.to_string())?;
            assert_eq!(config.client_encoding.as_deref(), Some("windows-1252"));
            Ok(())
        });
    }

    #[test]
    fn test_load_from_missing_file() {
        Jail::expect_with(|jail| {
            jail.set_env("CLIENT_ENCODING", "utf-8");

            let result = AppConfig::load_from(Some(Path::new("does-not-exist.toml")));
            assert!(matches!(result, Err(ConfigError::LoadFailed(_))));
            Ok(())
        });
    }
}
