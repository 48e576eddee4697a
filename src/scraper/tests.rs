//! Scraper integration tests

#[cfg(test)]
mod cache_tests {
    use std::time::Duration;

    use crate::scraper::{CacheConfig, ResponseCache, ttl};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        name: String,
        pages: u32,
    }

    fn payload() -> Payload {
        Payload {
            name: "frieren".to_string(),
            pages: 28,
        }
    }

    #[tokio::test]
    async fn hit_returns_typed_value() {
        let cache = ResponseCache::new();

        cache.insert("otakudesu:anime:frieren", &payload(), ttl::MEDIUM).await;

        let hit: Option<Payload> = cache.get("otakudesu:anime:frieren").await;
        assert_eq!(hit, Some(payload()));
    }

    #[tokio::test]
    async fn miss_on_unknown_key() {
        let cache = ResponseCache::new();
        let miss: Option<Payload> = cache.get("otakudesu:anime:unknown").await;
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn entries_expire_after_their_own_ttl() {
        let cache = ResponseCache::new();

        cache
            .insert("short", &payload(), Duration::from_millis(20))
            .await;
        cache.insert("long", &payload(), ttl::DAY).await;

        tokio::time::sleep(Duration::from_millis(60)).await;

        let expired: Option<Payload> = cache.get("short").await;
        let alive: Option<Payload> = cache.get("long").await;
        assert!(expired.is_none(), "short-TTL entry must expire");
        assert_eq!(alive, Some(payload()), "long-TTL entry must survive");
    }

    #[tokio::test]
    async fn invalidate_and_clear() {
        let cache = ResponseCache::with_config(CacheConfig { max_entries: 16 });

        cache.insert("a", &payload(), ttl::LONG).await;
        cache.insert("b", &payload(), ttl::LONG).await;

        cache.invalidate("a").await;
        let gone: Option<Payload> = cache.get("a").await;
        let kept: Option<Payload> = cache.get("b").await;
        assert!(gone.is_none());
        assert!(kept.is_some());

        cache.clear();
        let after_clear: Option<Payload> = cache.get("b").await;
        assert!(after_clear.is_none());
    }

    #[test]
    fn ttl_tiers_match_expected_windows() {
        assert_eq!(ttl::SHORT, Duration::from_secs(300));
        assert_eq!(ttl::MEDIUM, Duration::from_secs(900));
        assert_eq!(ttl::LONG, Duration::from_secs(3600));
        assert_eq!(ttl::DAY, Duration::from_secs(86_400));
    }
}

#[cfg(test)]
mod pagination_tests {
    use crate::scraper::Pagination;

    #[test]
    fn middle_page_links_both_ways() {
        let p = Pagination::from_pages(3, 10);
        assert!(p.has_next_page);
        assert!(p.has_prev_page);
        assert_eq!(p.next_page, Some(4));
        assert_eq!(p.prev_page, Some(2));
    }

    #[test]
    fn first_page_has_no_prev() {
        let p = Pagination::from_pages(1, 10);
        assert!(!p.has_prev_page);
        assert!(p.prev_page.is_none());
        assert_eq!(p.next_page, Some(2));
    }

    #[test]
    fn last_page_has_no_next() {
        let p = Pagination::from_pages(10, 10);
        assert!(!p.has_next_page);
        assert!(p.next_page.is_none());
        assert_eq!(p.prev_page, Some(9));
    }

    #[test]
    fn flags_always_agree_with_links() {
        for current in 1..=5u32 {
            for total in 1..=5u32 {
                let p = Pagination::from_pages(current, total);
                assert_eq!(p.has_next_page, p.next_page.is_some());
                assert_eq!(p.has_prev_page, p.prev_page.is_some());
            }
        }
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Pagination::from_pages(2, 3)).unwrap();
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["prevPage"], 1);
    }
}

#[cfg(test)]
mod registry_tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::scraper::{MediaCard, MediaKind, Result, ScraperError, Source, SourceRegistry};

    struct FixedSource {
        id: &'static str,
        fail: bool,
    }

    #[async_trait]
    impl Source for FixedSource {
        fn id(&self) -> &'static str {
            self.id
        }

        fn name(&self) -> &'static str {
            "Fixed"
        }

        fn base_url(&self) -> &str {
            "https://example.com"
        }

        fn kind(&self) -> MediaKind {
            MediaKind::Anime
        }

        async fn search_cards(&self, query: &str, _page: u32) -> Result<Vec<MediaCard>> {
            if self.fail {
                return Err(ScraperError::Api {
                    status: 500,
                    message: "boom".to_string(),
                });
            }

            Ok(vec![MediaCard {
                title: query.to_string(),
                slug: query.to_lowercase(),
                image: None,
                kind: MediaKind::Anime,
                source: self.id.to_string(),
            }])
        }
    }

    fn registry() -> SourceRegistry {
        let mut registry = SourceRegistry::new();
        registry.add_source(Arc::new(FixedSource {
            id: "alpha",
            fail: false,
        }));
        registry.add_source(Arc::new(FixedSource {
            id: "beta",
            fail: true,
        }));
        registry.add_source(Arc::new(FixedSource {
            id: "gamma",
            fail: false,
        }));
        registry
    }

    #[test]
    fn lookup_by_id() {
        let registry = registry();
        assert_eq!(registry.sources().len(), 3);
        assert!(registry.get("beta").is_some());
        assert!(registry.get("delta").is_none());
    }

    #[tokio::test]
    async fn search_all_skips_failing_sources() {
        let registry = registry();

        let cards = registry.search_all("Frieren", 1).await.unwrap();
        assert_eq!(cards.len(), 2);

        let sources: Vec<&str> = cards.iter().map(|c| c.source.as_str()).collect();
        assert_eq!(sources, vec!["alpha", "gamma"]);
    }
}
