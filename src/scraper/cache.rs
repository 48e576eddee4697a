use std::sync::Arc;
use std::time::{Duration, Instant};

use moka::{Expiry, future::Cache};
use serde::{Serialize, de::DeserializeOwned};

/// Fixed TTL tiers shared by every source. Individual operations may also
/// pick a custom duration (the novel source refreshes its latest-updates
/// feed every two minutes).
pub mod ttl {
    use std::time::Duration;

    pub const SHORT: Duration = Duration::from_secs(5 * 60);
    pub const MEDIUM: Duration = Duration::from_secs(15 * 60);
    pub const LONG: Duration = Duration::from_secs(60 * 60);
    pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);
}

#[derive(Clone)]
struct CachedEntry {
    value: Arc<serde_json::Value>,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, CachedEntry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &CachedEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Process-local cache of extracted responses.
///
/// Keys are `"{source}:{operation}:{args}"` strings; values are JSON
/// snapshots of the extracted result so one cache can hold every source's
/// types. Each entry carries its own TTL.
#[derive(Clone)]
pub struct ResponseCache {
    inner: Cache<String, CachedEntry>,
}

impl ResponseCache {
    /// Create a new cache with default settings
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create a new cache with custom configuration
    pub fn with_config(config: CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_entries)
            .expire_after(PerEntryTtl)
            .build();

        Self { inner }
    }

    /// Get a cached value, if present and not expired.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entry = self.inner.get(key).await?;
        serde_json::from_value((*entry.value).clone()).ok()
    }

    /// Cache a value under the given key for `ttl`.
    pub async fn insert<T: Serialize>(&self, key: impl Into<String>, value: &T, ttl: Duration) {
        let Ok(snapshot) = serde_json::to_value(value) else {
            return;
        };

        self.inner
            .insert(
                key.into(),
                CachedEntry {
                    value: Arc::new(snapshot),
                    ttl,
                },
            )
            .await;
    }

    /// Drop a single entry.
    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    /// Clear the cache
    pub fn clear(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.inner.entry_count(),
        }
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached responses
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { max_entries: 4096 }
    }
}

impl From<crate::config::CacheSettings> for CacheConfig {
    fn from(settings: crate::config::CacheSettings) -> Self {
        Self {
            max_entries: settings.max_entries,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub entries: u64,
}
