use async_trait::async_trait;
use tracing::debug;

use super::extract;
use super::types::{AnimeDetail, AnimeIndex, GenreAnime, HomePage, PagedAnime, Season, SeasonAnime};
use crate::config::KusonimeConfig;
use crate::scraper::{
    Genre, MediaCard, MediaKind, ResponseCache, Result, ScraperError,
    source::{HttpClient, Source},
    ttl,
};

/// kusonime.com — Indonesian anime batch-download site.
pub struct KusonimeSource {
    http: HttpClient,
    cache: ResponseCache,
    base_url: String,
}

impl KusonimeSource {
    pub fn new(config: &KusonimeConfig, cache: ResponseCache) -> Self {
        Self {
            http: HttpClient::new(&config.base_url),
            cache,
            base_url: config.base_url.clone(),
        }
    }

    /// Front page: latest batches plus recommendations.
    pub async fn home(&self) -> Result<HomePage> {
        let key = "kusonime:home";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let body = self.http.get_text("/").await?;
        let home = extract::parse_home(&body);

        self.cache.insert(key, &home, ttl::SHORT).await;
        Ok(home)
    }

    /// Paginated latest releases.
    pub async fn latest(&self, page: u32) -> Result<PagedAnime> {
        let key = format!("kusonime:latest:{page}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let path = if page <= 1 {
            "/".to_string()
        } else {
            format!("/page/{page}/")
        };
        let body = self.http.get_text(&path).await?;
        let (anime, pagination) = extract::parse_listing(&body);

        let result = PagedAnime { anime, pagination };
        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    pub async fn search(&self, query: &str, page: u32) -> Result<PagedAnime> {
        if query.trim().is_empty() {
            return Err(ScraperError::BadRequest("Query 'q' is required".to_string()));
        }

        let key = format!("kusonime:search:{}:{page}", query.to_lowercase());
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let encoded = urlencoding::encode(query);
        let path = if page <= 1 {
            format!("/?s={encoded}&post_type=post")
        } else {
            format!("/page/{page}/?s={encoded}&post_type=post")
        };
        let body = self.http.get_text(&path).await?;
        let (anime, pagination) = extract::parse_listing(&body);

        let result = PagedAnime { anime, pagination };
        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    /// Release detail. The site hangs a language suffix (and sometimes a
    /// "batch" marker) off post slugs, so a bare slug is retried with the
    /// known variants before giving up.
    pub async fn anime_detail(&self, slug: &str) -> Result<AnimeDetail> {
        let key = format!("kusonime:detail:{slug}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let variants = [
            format!("{slug}-subtitle-indonesia"),
            format!("{slug}-batch-subtitle-indonesia"),
            format!("{slug}-sub-indo"),
            slug.to_string(),
        ];

        for variant in &variants {
            match self.http.get_text(&format!("/{variant}/")).await {
                Ok(body) => {
                    if let Some(detail) = extract::parse_detail(&body) {
                        self.cache.insert(key.as_str(), &detail, ttl::MEDIUM).await;
                        return Ok(detail);
                    }
                }
                Err(e) => {
                    debug!("kusonime variant {variant} failed: {e}");
                }
            }
        }

        Err(ScraperError::NotFound(format!(
            "Anime with slug '{slug}' not found"
        )))
    }

    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let key = "kusonime:genres";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let body = self.http.get_text("/genres/").await?;
        let genres = extract::parse_genres(&body);

        self.cache.insert(key, &genres, ttl::LONG).await;
        Ok(genres)
    }

    pub async fn anime_by_genre(&self, genre: &str, page: u32) -> Result<GenreAnime> {
        let key = format!("kusonime:genre:{genre}:{page}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let path = if page <= 1 {
            format!("/genres/{genre}/")
        } else {
            format!("/genres/{genre}/page/{page}/")
        };
        let body = self.http.get_text(&path).await?;
        let (anime, pagination) = extract::parse_listing(&body);

        let result = GenreAnime {
            genre: genre.to_string(),
            anime,
            pagination,
        };
        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    pub async fn seasons(&self) -> Result<Vec<Season>> {
        let key = "kusonime:seasons";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let body = self.http.get_text("/").await?;
        let seasons = extract::parse_seasons(&body);

        self.cache.insert(key, &seasons, ttl::LONG).await;
        Ok(seasons)
    }

    pub async fn anime_by_season(&self, season: &str, page: u32) -> Result<SeasonAnime> {
        let key = format!("kusonime:season:{season}:{page}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let path = if page <= 1 {
            format!("/seasons/{season}/")
        } else {
            format!("/seasons/{season}/page/{page}/")
        };
        let body = self.http.get_text(&path).await?;
        let (anime, pagination) = extract::parse_listing(&body);

        let result = SeasonAnime {
            season: season.to_string(),
            anime,
            pagination,
        };
        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    /// A-to-Z index of every batch on the site.
    pub async fn anime_index(&self) -> Result<AnimeIndex> {
        let key = "kusonime:anime-list";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let body = self.http.get_text("/list-anime-batch-sub-indo/").await?;
        let index = extract::parse_anime_index(&body);

        self.cache.insert(key, &index, ttl::LONG).await;
        Ok(index)
    }
}

#[async_trait]
impl Source for KusonimeSource {
    fn id(&self) -> &'static str {
        "kusonime"
    }

    fn name(&self) -> &'static str {
        "Kusonime"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Anime
    }

    async fn search_cards(&self, query: &str, page: u32) -> Result<Vec<MediaCard>> {
        let result = self.search(query, page).await?;

        Ok(result
            .anime
            .into_iter()
            .map(|card| MediaCard {
                title: card.title,
                slug: card.slug,
                image: (!card.poster.is_empty()).then_some(card.poster),
                kind: MediaKind::Anime,
                source: "kusonime".to_string(),
            })
            .collect())
    }
}
