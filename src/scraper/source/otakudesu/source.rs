use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use once_cell::sync::Lazy;
use regex::Regex;

use super::extract;
use super::types::{
    AnimeCard, AnimeDetail, AnimeIndex, EpisodeDetail, GenreAnime, HomePage, PagedAnime,
    ScheduleDay, StreamingSource,
};
use crate::config::OtakudesuConfig;
use crate::scraper::{
    Genre, MediaCard, MediaKind, ResponseCache, Result, ScraperError,
    source::{HttpClient, Source},
    ttl,
};

static IFRAME_SRC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<iframe[^>]+src="([^"]+)""#).unwrap());

/// otakudesu — Indonesian anime streaming/download site.
pub struct OtakudesuSource {
    http: HttpClient,
    cache: ResponseCache,
    base_url: String,
}

impl OtakudesuSource {
    pub fn new(config: &OtakudesuConfig, cache: ResponseCache) -> Self {
        Self {
            http: HttpClient::new(&config.base_url),
            cache,
            base_url: config.base_url.clone(),
        }
    }

    /// Front page: ongoing and completed strips.
    pub async fn home(&self) -> Result<HomePage> {
        let key = "otakudesu:home";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let body = self.http.get_text("/").await?;
        let home = extract::parse_home(&body);

        self.cache.insert(key, &home, ttl::SHORT).await;
        Ok(home)
    }

    pub async fn ongoing(&self, page: u32) -> Result<PagedAnime> {
        self.listing("otakudesu:ongoing", "/ongoing-anime", page).await
    }

    pub async fn complete(&self, page: u32) -> Result<PagedAnime> {
        self.listing("otakudesu:complete", "/complete-anime", page).await
    }

    async fn listing(&self, key_prefix: &str, path: &str, page: u32) -> Result<PagedAnime> {
        let key = format!("{key_prefix}:{page}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let path = if page <= 1 {
            format!("{path}/")
        } else {
            format!("{path}/page/{page}/")
        };
        let body = self.http.get_text(&path).await?;
        let (anime, pagination) = extract::parse_listing(&body);

        let result = PagedAnime { anime, pagination };
        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    /// A-to-Z index of every series.
    pub async fn anime_index(&self) -> Result<AnimeIndex> {
        let key = "otakudesu:anime-list";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let body = self.http.get_text("/anime-list/").await?;
        let index = extract::parse_anime_index(&body);

        self.cache.insert(key, &index, ttl::LONG).await;
        Ok(index)
    }

    pub async fn anime_detail(&self, slug: &str) -> Result<AnimeDetail> {
        let key = format!("otakudesu:anime:{slug}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let body = self.http.get_text(&format!("/anime/{slug}/")).await?;
        let detail = extract::parse_detail(&body)
            .ok_or_else(|| ScraperError::NotFound(format!("Anime '{slug}' not found")))?;

        self.cache.insert(key, &detail, ttl::MEDIUM).await;
        Ok(detail)
    }

    pub async fn episode(&self, slug: &str) -> Result<EpisodeDetail> {
        let key = format!("otakudesu:episode:{slug}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let body = self.http.get_text(&format!("/episode/{slug}/")).await?;
        let episode = extract::parse_episode(&body)
            .ok_or_else(|| ScraperError::NotFound(format!("Episode '{slug}' not found")))?;

        self.cache.insert(key, &episode, ttl::MEDIUM).await;
        Ok(episode)
    }

    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let key = "otakudesu:genres";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let body = self.http.get_text("/genre-list/").await?;
        let genres = extract::parse_genres(&body);

        self.cache.insert(key, &genres, ttl::LONG).await;
        Ok(genres)
    }

    pub async fn anime_by_genre(&self, genre: &str, page: u32) -> Result<GenreAnime> {
        let key = format!("otakudesu:genre:{genre}:{page}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let path = if page <= 1 {
            format!("/genres/{genre}/")
        } else {
            format!("/genres/{genre}/page/{page}/")
        };
        let body = self.http.get_text(&path).await?;
        let (anime, pagination) = extract::parse_genre_listing(&body);

        let result = GenreAnime {
            genre: genre.to_string(),
            anime,
            pagination,
        };
        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    /// Weekly release schedule.
    pub async fn schedule(&self) -> Result<Vec<ScheduleDay>> {
        let key = "otakudesu:schedule";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let body = self.http.get_text("/jadwal-rilis/").await?;
        let schedule = extract::parse_schedule(&body);

        self.cache.insert(key, &schedule, ttl::LONG).await;
        Ok(schedule)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<AnimeCard>> {
        if query.trim().is_empty() {
            return Err(ScraperError::BadRequest("Query 'q' is required".to_string()));
        }

        let key = format!("otakudesu:search:{}", query.to_lowercase());
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let path = format!("/?s={}&post_type=anime", urlencoding::encode(query));
        let body = self.http.get_text(&path).await?;
        let results = extract::parse_search(&body);

        self.cache.insert(key, &results, ttl::SHORT).await;
        Ok(results)
    }

    /// Resolve a mirror's opaque payload to a playable embed URL.
    ///
    /// Pure pass-through: the base64 payload from the episode page is
    /// decoded, forwarded to the site's ajax endpoint as-is, and the embed
    /// URL is lifted out of the HTML fragment that comes back. Not cached;
    /// upstream replies are nonce-bound.
    pub async fn resolve_streaming(&self, data_content: &str) -> Result<StreamingSource> {
        let decoded = STANDARD
            .decode(data_content.trim())
            .map_err(|_| ScraperError::BadRequest("dataContent is not valid base64".to_string()))?;

        let payload: serde_json::Value = serde_json::from_slice(&decoded)
            .map_err(|_| ScraperError::BadRequest("dataContent is not a valid payload".to_string()))?;

        let fields = payload
            .as_object()
            .ok_or_else(|| ScraperError::BadRequest("dataContent is not a valid payload".to_string()))?;

        let params: Vec<(String, String)> = fields
            .iter()
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), value)
            })
            .collect();

        let body = self
            .http
            .post_form("/wp-admin/admin-ajax.php", &params)
            .await?;

        let reply: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| ScraperError::Parse(format!("Unexpected ajax reply: {e}")))?;

        let embed = reply
            .get("data")
            .and_then(|d| d.as_str())
            .ok_or_else(|| ScraperError::Parse("Ajax reply carries no embed data".to_string()))?;

        let embed_html = STANDARD
            .decode(embed)
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_else(|_| embed.to_string());

        let url = IFRAME_SRC_RE
            .captures(&embed_html)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ScraperError::Parse("No embed URL in ajax reply".to_string()))?;

        Ok(StreamingSource { url })
    }
}

#[async_trait]
impl Source for OtakudesuSource {
    fn id(&self) -> &'static str {
        "otakudesu"
    }

    fn name(&self) -> &'static str {
        "Otakudesu"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Anime
    }

    async fn search_cards(&self, query: &str, _page: u32) -> Result<Vec<MediaCard>> {
        let results = self.search(query).await?;

        Ok(results
            .into_iter()
            .map(|card| MediaCard {
                title: card.title,
                slug: card.slug,
                image: (!card.poster.is_empty()).then_some(card.poster),
                kind: MediaKind::Anime,
                source: "otakudesu".to_string(),
            })
            .collect())
    }
}
