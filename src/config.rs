//! Application configuration.
//!
//! Settings are read from `config/default.toml` when present and can be
//! overridden through `OTAKUHUB_*` environment variables. Every field has a
//! default so the server runs with no configuration at all.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub cache: CacheSettings,
    pub sources: SourcesConfig,
}

/// HTTP server bind settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log level (trace, debug, info, warn, error)
    pub level: String,
    /// Directory for rotated log files; file logging is off when empty
    pub dir: String,
    /// Emit file logs as JSON
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: String::new(),
            json: false,
        }
    }
}

/// Response cache sizing.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Maximum number of cached responses
    pub max_entries: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { max_entries: 4096 }
    }
}

/// Upstream base URLs, one block per source.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub otakudesu: OtakudesuConfig,
    pub kusonime: KusonimeConfig,
    pub meio: MeioConfig,
    pub softkomik: SoftkomikConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OtakudesuConfig {
    pub base_url: String,
}

impl Default for OtakudesuConfig {
    fn default() -> Self {
        Self {
            base_url: "https://otakudesu.cloud".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KusonimeConfig {
    pub base_url: String,
}

impl Default for KusonimeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://kusonime.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MeioConfig {
    pub base_url: String,
}

impl Default for MeioConfig {
    fn default() -> Self {
        Self {
            base_url: "https://meionovels.com".to_string(),
        }
    }
}

/// softkomik talks to a JSON API host next to the HTML site, and serves
/// images from two CDN hosts picked by path prefix.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SoftkomikConfig {
    pub base_url: String,
    pub api_url: String,
    pub image_url: String,
    pub cover_url: String,
}

impl Default for SoftkomikConfig {
    fn default() -> Self {
        Self {
            base_url: "https://softkomik.com".to_string(),
            api_url: "https://v2.softkomik.com".to_string(),
            image_url: "https://image.softkomik.com".to_string(),
            cover_url: "https://cover.softdevices.my.id/softkomik-cover".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config/default.toml` and the environment.
    pub fn load() -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("OTAKUHUB")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.sources.kusonime.base_url, "https://kusonime.com");
        assert!(config.sources.softkomik.api_url.starts_with("https://v2."));
        assert!(config.cache.max_entries > 0);
    }
}
