use async_trait::async_trait;

use crate::scraper::{MediaCard, MediaKind, Result};

/// Core trait implemented by every upstream source.
///
/// Each source exposes its own richly-typed operations on the concrete
/// struct; this trait carries the identity metadata plus the one operation
/// all sources share, so the registry can list them and fan a search out
/// across all of them.
#[async_trait]
pub trait Source: Send + Sync {
    /// Source identifier (e.g., "otakudesu", "meio")
    fn id(&self) -> &'static str;

    /// Human-readable source name
    fn name(&self) -> &'static str;

    /// Upstream base URL
    fn base_url(&self) -> &str;

    /// Kind of media this source serves
    fn kind(&self) -> MediaKind;

    /// Search this source, projected onto the uniform card shape.
    async fn search_cards(&self, query: &str, page: u32) -> Result<Vec<MediaCard>>;
}
