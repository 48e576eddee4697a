mod cache;
mod manager;
mod source;
mod types;

#[cfg(test)]
mod tests;

pub use cache::{CacheConfig, CacheStats, ResponseCache, ttl};
pub use manager::SourceRegistry;
pub use source::{
    HttpClient, KusonimeSource, MeioSource, OtakudesuSource, SoftkomikSource, Source,
};
pub use types::{Genre, MediaCard, MediaKind, Pagination};

use crate::Sources;

/// Scraper result type
pub type Result<T> = std::result::Result<T, ScraperError>;

/// Scraper error types
#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Upstream error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Build the registry over every configured source.
#[must_use]
pub fn create_default_registry(sources: &Sources) -> SourceRegistry {
    let mut registry = SourceRegistry::new();

    registry.add_source(sources.otakudesu.clone());
    registry.add_source(sources.kusonime.clone());
    registry.add_source(sources.meio.clone());
    registry.add_source(sources.softkomik.clone());

    registry
}
