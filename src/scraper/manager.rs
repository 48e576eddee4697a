use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;

use crate::scraper::{MediaCard, Result, source::Source};

/// Registry over every configured source.
///
/// Routes talk to sources directly; the registry backs the discovery
/// endpoint and the cross-source search fan-out.
pub struct SourceRegistry {
    sources: Vec<Arc<dyn Source>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Register a source
    pub fn add_source(&mut self, source: Arc<dyn Source>) {
        self.sources.push(source);
    }

    /// Get all sources
    pub fn sources(&self) -> &[Arc<dyn Source>] {
        &self.sources
    }

    /// Look up a source by id
    pub fn get(&self, id: &str) -> Option<&Arc<dyn Source>> {
        self.sources.iter().find(|s| s.id() == id)
    }

    /// Search every source concurrently and merge the results.
    ///
    /// A source that errors is skipped rather than failing the whole
    /// request; its failure is visible at debug level.
    pub async fn search_all(&self, query: &str, page: u32) -> Result<Vec<MediaCard>> {
        let searches = self
            .sources
            .iter()
            .map(|source| {
                let source = source.clone();
                async move { (source.id(), source.search_cards(query, page).await) }
            })
            .collect::<Vec<_>>();

        let mut cards = Vec::new();
        for (id, outcome) in join_all(searches).await {
            match outcome {
                Ok(found) => {
                    debug!("Source {id} returned {} results", found.len());
                    cards.extend(found);
                }
                Err(e) => {
                    debug!("Source {id} search failed: {e}");
                }
            }
        }

        Ok(cards)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
