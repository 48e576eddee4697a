use std::time::Duration;

use async_trait::async_trait;

use super::extract;
use super::types::{Chapter, ChapterContent, NovelDetail, NovelPage};
use crate::config::MeioConfig;
use crate::scraper::{
    Genre, MediaCard, MediaKind, ResponseCache, Result, ScraperError,
    source::{HttpClient, Source},
    ttl,
};

/// The front-page latest feed changes often; cache it shorter than the
/// generic tiers.
const LATEST_TTL: Duration = Duration::from_secs(2 * 60);

/// meionovels.com — translated-novel site on the Madara WordPress theme.
pub struct MeioSource {
    http: HttpClient,
    cache: ResponseCache,
    base_url: String,
}

impl MeioSource {
    pub fn new(config: &MeioConfig, cache: ResponseCache) -> Self {
        Self {
            http: HttpClient::new(&config.base_url),
            cache,
            base_url: config.base_url.clone(),
        }
    }

    pub async fn novel_list(&self, page: u32) -> Result<NovelPage> {
        let key = format!("meio:novel-list:{page}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let path = if page > 1 {
            format!("/novel/page/{page}/")
        } else {
            "/novel/".to_string()
        };
        let body = self.http.get_text(&path).await?;
        let result = extract::parse_novel_list(&body);

        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    pub async fn latest(&self) -> Result<NovelPage> {
        let key = "meio:latest";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let body = self.http.get_text("/").await?;
        let result = extract::parse_novel_list(&body);

        self.cache.insert(key, &result, LATEST_TTL).await;
        Ok(result)
    }

    pub async fn search(&self, query: &str) -> Result<NovelPage> {
        if query.trim().is_empty() {
            return Err(ScraperError::BadRequest("Query 'q' is required".to_string()));
        }

        let key = format!("meio:search:{}", query.to_lowercase());
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let path = format!("/?s={}&post_type=wp-manga", urlencoding::encode(query));
        let body = self.http.get_text(&path).await?;
        let result = NovelPage {
            novels: extract::parse_search(&body),
            has_next: false,
        };

        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    pub async fn novel_detail(&self, slug: &str) -> Result<NovelDetail> {
        let key = format!("meio:novel:{slug}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let body = self.http.get_text(&format!("/novel/{slug}/")).await?;
        let detail = extract::parse_novel_detail(&body, slug)
            .ok_or_else(|| ScraperError::NotFound(format!("Novel '{slug}' not found")))?;

        self.cache.insert(key, &detail, ttl::MEDIUM).await;
        Ok(detail)
    }

    /// Chapter list via the theme's ajax endpoint, which returns an HTML
    /// fragment rather than a full page.
    pub async fn chapter_list(&self, slug: &str) -> Result<Vec<Chapter>> {
        let key = format!("meio:chapters:{slug}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let body = self
            .http
            .get_text_with_headers(
                &format!("/novel/{slug}/ajax/chapters/"),
                &[("Content-Type", "application/x-www-form-urlencoded")],
            )
            .await?;
        let chapters = extract::parse_chapters(&body, slug);

        self.cache.insert(key, &chapters, ttl::MEDIUM).await;
        Ok(chapters)
    }

    pub async fn chapter_content(&self, slug: &str, chapter: &str) -> Result<ChapterContent> {
        let key = format!("meio:content:{slug}:{chapter}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let body = self
            .http
            .get_text(&format!("/novel/{slug}/{chapter}/"))
            .await?;
        let content = extract::parse_chapter_content(&body, slug, chapter).ok_or_else(|| {
            ScraperError::NotFound(format!("Chapter '{chapter}' of '{slug}' not found"))
        })?;

        self.cache.insert(key, &content, ttl::LONG).await;
        Ok(content)
    }

    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let key = "meio:genres";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let body = self.http.get_text("/novel/").await?;
        let genres = extract::parse_genres(&body);

        self.cache.insert(key, &genres, ttl::LONG).await;
        Ok(genres)
    }

    pub async fn novels_by_genre(&self, genre: &str, page: u32) -> Result<NovelPage> {
        let key = format!("meio:genre:{genre}:{page}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let path = if page > 1 {
            format!("/novel-genre/{genre}/page/{page}/")
        } else {
            format!("/novel-genre/{genre}/")
        };
        let body = self.http.get_text(&path).await?;
        let result = extract::parse_novel_list(&body);

        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }
}

#[async_trait]
impl Source for MeioSource {
    fn id(&self) -> &'static str {
        "meio"
    }

    fn name(&self) -> &'static str {
        "Meio Novels"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Novel
    }

    async fn search_cards(&self, query: &str, _page: u32) -> Result<Vec<MediaCard>> {
        let result = self.search(query).await?;

        Ok(result
            .novels
            .into_iter()
            .map(|novel| MediaCard {
                title: novel.title,
                slug: novel.slug,
                image: (!novel.cover.is_empty()).then_some(novel.cover),
                kind: MediaKind::Novel,
                source: "meio".to_string(),
            })
            .collect())
    }
}
