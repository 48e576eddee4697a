use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::api_types::{
    NextChapterProps, NextComicProps, NextData, V2ChapterImagesResponse, V2ChapterListResponse,
    V2ComicDetail, V2ComicItem, V2ListResponse,
};
use super::types::{
    ChapterImages, ChapterInfo, ChapterListResult, ComicDetail, ComicListing, ComicPage, Rating,
};
use crate::config::SoftkomikConfig;
use crate::scraper::{
    MediaCard, MediaKind, Pagination, ResponseCache, Result, ScraperError,
    source::{HttpClient, Source},
    ttl,
};

/// Upstream's fixed tag list; the JSON API has no genre-index endpoint.
const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Comedy",
    "Cooking",
    "Drama",
    "Ecchi",
    "Fantasy",
    "Harem",
    "Historical",
    "Horror",
    "Isekai",
    "Josei",
    "Martial Arts",
    "Mecha",
    "Military",
    "Music",
    "Mystery",
    "One Shot",
    "Psychological",
    "Romance",
    "School",
    "School Life",
    "Sci-fi",
    "Seinen",
    "Shoujo",
    "Shoujo Ai",
    "Shounen",
    "Shounen Ai",
    "Slice of Life",
    "Sports",
    "Super Power",
    "Supernatural",
    "Thriller",
    "Tragedy",
    "Webtoon",
    "magic",
];

const VALID_TYPES: &[&str] = &["manga", "manhwa", "manhua"];

static NEXT_DATA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<script id="__NEXT_DATA__"[^>]*>([^<]+)</script>"#).unwrap());

/// softkomik.com — comic reader with a JSON API on a sibling host; the
/// Next.js HTML pages embed the same payload and serve as fallback when the
/// API omits a record.
pub struct SoftkomikSource {
    site: HttpClient,
    api: HttpClient,
    cache: ResponseCache,
    base_url: String,
    image_url: String,
    cover_url: String,
}

impl SoftkomikSource {
    pub fn new(config: &SoftkomikConfig, cache: ResponseCache) -> Self {
        Self {
            site: HttpClient::with_referer(&config.base_url, &config.base_url),
            api: HttpClient::with_referer(&config.api_url, &config.base_url),
            cache,
            base_url: config.base_url.clone(),
            image_url: config.image_url.clone(),
            cover_url: config.cover_url.clone(),
        }
    }

    /// First page of new arrivals, capped at twelve cards.
    pub async fn new_comics(&self) -> Result<Vec<ComicListing>> {
        let key = "softkomik:home:new";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let comics = match self.request_v2::<V2ListResponse>("/komik?page=1").await {
            Some(list) => list
                .data
                .into_iter()
                .take(12)
                .map(|item| self.listing_from_item(item))
                .collect(),
            None => Vec::new(),
        };

        self.cache.insert(key, &comics, ttl::SHORT).await;
        Ok(comics)
    }

    pub async fn latest_updates(&self) -> Result<Vec<ComicListing>> {
        let key = "softkomik:home:latest";
        if let Some(hit) = self.cache.get(key).await {
            return Ok(hit);
        }

        let comics = match self.request_v2::<V2ListResponse>("/komik?page=1").await {
            Some(list) => list
                .data
                .into_iter()
                .map(|item| self.listing_from_item(item))
                .collect(),
            None => Vec::new(),
        };

        self.cache.insert(key, &comics, ttl::SHORT).await;
        Ok(comics)
    }

    pub async fn comic_list(&self, page: u32, search: Option<&str>) -> Result<ComicPage> {
        let key = format!(
            "softkomik:comics:{page}:{}",
            search.unwrap_or_default().to_lowercase()
        );
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let mut path = format!("/komik?page={page}");
        if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
            path.push_str(&format!("&search={}", urlencoding::encode(search)));
        }

        let result = self.listing_page(&path).await;
        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    pub async fn by_type(&self, comic_type: &str, page: u32) -> Result<ComicPage> {
        let comic_type = comic_type.to_lowercase();
        if !VALID_TYPES.contains(&comic_type.as_str()) {
            return Err(ScraperError::BadRequest(format!(
                "Invalid type. Valid types: {}",
                VALID_TYPES.join(", ")
            )));
        }

        let key = format!("softkomik:type:{comic_type}:{page}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let mut path = format!("/komik?type={comic_type}");
        if page > 1 {
            path.push_str(&format!("&page={page}"));
        }

        let result = self.listing_page(&path).await;
        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    pub async fn by_genre(&self, genre: &str, page: u32) -> Result<ComicPage> {
        let key = format!("softkomik:genre:{}:{page}", genre.to_lowercase());
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let mut path = format!("/komik?genre={}", urlencoding::encode(genre));
        if page > 1 {
            path.push_str(&format!("&page={page}"));
        }

        let result = self.listing_page(&path).await;
        self.cache.insert(key, &result, ttl::SHORT).await;
        Ok(result)
    }

    /// The site's fixed tag list.
    pub fn genres(&self) -> Vec<String> {
        GENRES.iter().map(|g| g.to_string()).collect()
    }

    pub async fn comic_detail(&self, slug: &str) -> Result<ComicDetail> {
        let key = format!("softkomik:detail:{slug}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let full_slug = full_slug(slug);

        let detail = match self
            .request_v2::<V2ComicDetail>(&format!("/komik/{full_slug}"))
            .await
        {
            Some(raw) => Some(self.detail_from_raw(raw)),
            None => self
                .next_data_props::<NextComicProps>(&format!("/{full_slug}"))
                .await
                .and_then(|props| props.komik)
                .map(|raw| self.detail_from_raw(raw)),
        };

        let detail = detail
            .ok_or_else(|| ScraperError::NotFound(format!("Comic '{slug}' not found")))?;

        self.cache.insert(key.as_str(), &detail, ttl::MEDIUM).await;
        Ok(detail)
    }

    pub async fn chapter_list(&self, slug: &str) -> Result<ChapterListResult> {
        let key = format!("softkomik:chapters:{slug}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let full_slug = full_slug(slug);

        // JSON API first, then the chapter index embedded in the HTML page.
        let result = match self
            .request_v2::<V2ChapterListResponse>(&format!("/komik/{full_slug}/chapter?limit=9999999"))
            .await
        {
            Some(list) => Some(self.chapter_list_from(&full_slug, list)),
            None => self
                .next_data_props::<NextComicProps>(&format!("/{full_slug}"))
                .await
                .map(|props| {
                    self.chapter_list_from(
                        &full_slug,
                        V2ChapterListResponse {
                            title: props.title,
                            start_chapter: props.start_chapter,
                            new_chapter: props.new_chapter,
                            chapter: props.chapter,
                        },
                    )
                }),
        };

        let result =
            result.ok_or_else(|| ScraperError::NotFound(format!("Comic '{slug}' not found")))?;

        self.cache.insert(key.as_str(), &result, ttl::MEDIUM).await;
        Ok(result)
    }

    /// Page images for one chapter. Chapter numbers are inconsistently
    /// zero-padded upstream, so every padding variant is tried before the
    /// HTML fallback.
    pub async fn chapter_images(&self, slug: &str, chapter: &str) -> Result<ChapterImages> {
        let key = format!("softkomik:images:{slug}:{chapter}");
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let full_slug = full_slug(slug);

        for variant in chapter_variations(chapter) {
            let response = match self
                .request_v2::<V2ChapterImagesResponse>(&format!(
                    "/komik/{full_slug}/chapter/{variant}"
                ))
                .await
            {
                Some(response) => Some(response),
                None => self
                    .next_data_props::<NextChapterProps>(&format!(
                        "/{full_slug}/chapter/{variant}"
                    ))
                    .await
                    .and_then(|props| props.data),
            };

            let Some(response) = response else { continue };
            let Some(data) = response.data else { continue };
            if data.image_src.is_empty() {
                continue;
            }

            let images = data
                .image_src
                .iter()
                .filter_map(|src| self.resolve_image(src))
                .collect();

            let result = ChapterImages {
                title: response.komik.map(|k| k.title).unwrap_or_default(),
                comic_slug: slug.to_string(),
                chapter_number: variant,
                images,
                prev_chapter: response.prev_chapter.first().map(|c| c.chapter.clone()),
                next_chapter: response.next_chapter.first().map(|c| c.chapter.clone()),
            };

            self.cache.insert(key.as_str(), &result, ttl::LONG).await;
            return Ok(result);
        }

        Err(ScraperError::NotFound(format!(
            "Chapter '{chapter}' of '{slug}' not found or has no images"
        )))
    }

    async fn listing_page(&self, path: &str) -> ComicPage {
        match self.request_v2::<V2ListResponse>(path).await {
            Some(list) => ComicPage {
                comics: list
                    .data
                    .into_iter()
                    .map(|item| self.listing_from_item(item))
                    .collect(),
                pagination: Pagination::from_pages(list.page.max(1), list.max_page.max(1)),
            },
            None => ComicPage {
                comics: Vec::new(),
                pagination: Pagination::single(),
            },
        }
    }

    /// GET against the JSON API; any failure is a soft miss so callers can
    /// fall back to the HTML page.
    async fn request_v2<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match self.api.get_json(path).await {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("softkomik v2 request {path} failed: {e}");
                None
            }
        }
    }

    /// Fetch an HTML page and deserialize its `__NEXT_DATA__` page props.
    async fn next_data_props<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        let body = match self.site.get_text(path).await {
            Ok(body) => body,
            Err(e) => {
                debug!("softkomik page {path} failed: {e}");
                return None;
            }
        };

        let raw = NEXT_DATA_RE.captures(&body)?.get(1)?.as_str();
        let next_data: NextData = serde_json::from_str(raw).ok()?;
        serde_json::from_value(next_data.props.page_props).ok()
    }

    fn listing_from_item(&self, item: V2ComicItem) -> ComicListing {
        ComicListing {
            slug: strip_slug(&item.title_slug),
            url: format!("{}/{}", self.base_url, item.title_slug),
            title: item.title,
            thumbnail: item.gambar.as_deref().and_then(|g| self.resolve_image(g)),
            comic_type: item.comic_type.filter(|v| !v.is_empty()),
            status: item.status.filter(|v| !v.is_empty()),
            latest_chapter: item.latest_chapter.filter(|v| !v.is_empty()),
            updated_at: item.updated_at.filter(|v| !v.is_empty()),
            visitor: item.visitor,
        }
    }

    fn detail_from_raw(&self, raw: V2ComicDetail) -> ComicDetail {
        ComicDetail {
            title: raw.title,
            alternative_title: raw.title_alt.filter(|v| !v.is_empty()),
            comic_type: raw.comic_type.filter(|v| !v.is_empty()),
            status: raw.status.filter(|v| !v.is_empty()),
            release_year: raw.tahun.filter(|v| !v.is_empty()),
            author: raw.author.filter(|v| !v.is_empty()),
            rating: raw.rating.map(|r| Rating {
                value: r.value,
                member: r.member,
            }),
            description: raw.sinopsis.filter(|v| !v.is_empty()),
            genres: raw.genre.unwrap_or_default(),
            thumbnail: raw.gambar.as_deref().and_then(|g| self.resolve_image(g)),
            visitor: raw.visitor,
            latest_chapter: raw.latest_chapter.filter(|v| !v.is_empty()),
            updated_at: raw.updated_at.filter(|v| !v.is_empty()),
        }
    }

    fn chapter_list_from(
        &self,
        full_slug: &str,
        list: V2ChapterListResponse,
    ) -> ChapterListResult {
        let chapters: Vec<ChapterInfo> = list
            .chapter
            .iter()
            .map(|c| ChapterInfo {
                number: c.chapter.clone(),
                url: format!("{}/{full_slug}/chapter/{}", self.base_url, c.chapter),
            })
            .collect();

        ChapterListResult {
            title: list.title,
            first_chapter: list.start_chapter.first().map(|c| c.chapter.clone()),
            latest_chapter: list.new_chapter.first().map(|c| c.chapter.clone()),
            total_chapters: chapters.len(),
            chapters,
        }
    }

    /// Absolute image URL for an upstream path. The CDN host depends on the
    /// path prefix.
    fn resolve_image(&self, path: &str) -> Option<String> {
        if path.is_empty() {
            return None;
        }
        if path.starts_with("http") {
            return Some(path.to_string());
        }

        let normalized = path.strip_prefix('/').unwrap_or(path);

        if normalized.starts_with("image-cover/") || normalized.starts_with("uploads-cover") {
            return Some(format!("{}/{normalized}", self.cover_url));
        }

        if normalized.starts_with("NodeJs/") || normalized.starts_with("img-file/") {
            return Some(format!("{}/softkomik/{normalized}", self.image_url));
        }

        Some(format!("{}/{normalized}", self.image_url))
    }
}

/// Slug as the upstream API expects it.
fn full_slug(slug: &str) -> String {
    format!("{slug}-bahasa-indonesia")
}

/// Public slug, without the upstream's fixed language suffix.
fn strip_slug(title_slug: &str) -> String {
    title_slug
        .trim_end_matches("-bahasa-indonesia")
        .to_string()
}

/// Zero-padding variants of a plain chapter number, in probe order.
fn chapter_variations(chapter: &str) -> Vec<String> {
    let mut variations = vec![chapter.to_string()];

    if let Ok(num) = chapter.parse::<u64>()
        && num.to_string() == chapter
    {
        for width in 2..=4usize {
            if chapter.len() < width {
                let padded = format!("{num:0width$}");
                if !variations.contains(&padded) {
                    variations.push(padded);
                }
            }
        }
    }

    variations
}

#[async_trait]
impl Source for SoftkomikSource {
    fn id(&self) -> &'static str {
        "softkomik"
    }

    fn name(&self) -> &'static str {
        "Softkomik"
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn kind(&self) -> MediaKind {
        MediaKind::Manga
    }

    async fn search_cards(&self, query: &str, page: u32) -> Result<Vec<MediaCard>> {
        if query.trim().is_empty() {
            return Err(ScraperError::BadRequest("Query 'q' is required".to_string()));
        }

        let result = self.comic_list(page, Some(query)).await?;

        Ok(result
            .comics
            .into_iter()
            .map(|comic| MediaCard {
                title: comic.title,
                slug: comic.slug,
                image: comic.thumbnail,
                kind: MediaKind::Manga,
                source: "softkomik".to_string(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::ResponseCache;

    fn test_source() -> SoftkomikSource {
        SoftkomikSource::new(&SoftkomikConfig::default(), ResponseCache::new())
    }

    #[test]
    fn chapter_variations_pad_plain_numbers() {
        assert_eq!(chapter_variations("7"), vec!["7", "07", "007", "0007"]);
        assert_eq!(chapter_variations("42"), vec!["42", "042", "0042"]);
        assert_eq!(chapter_variations("123"), vec!["123", "0123"]);
        assert_eq!(chapter_variations("1234"), vec!["1234"]);
    }

    #[test]
    fn chapter_variations_leave_non_plain_numbers_alone() {
        assert_eq!(chapter_variations("7.5"), vec!["7.5"]);
        assert_eq!(chapter_variations("07"), vec!["07"]);
        assert_eq!(chapter_variations("extra"), vec!["extra"]);
    }

    #[test]
    fn resolve_image_picks_host_by_prefix() {
        let source = test_source();

        assert_eq!(
            source.resolve_image("https://cdn.example/x.jpg").as_deref(),
            Some("https://cdn.example/x.jpg")
        );
        assert_eq!(
            source.resolve_image("/image-cover/solo.jpg").as_deref(),
            Some("https://cover.softdevices.my.id/softkomik-cover/image-cover/solo.jpg")
        );
        assert_eq!(
            source.resolve_image("NodeJs/solo/1.jpg").as_deref(),
            Some("https://image.softkomik.com/softkomik/NodeJs/solo/1.jpg")
        );
        assert_eq!(
            source.resolve_image("misc/banner.jpg").as_deref(),
            Some("https://image.softkomik.com/misc/banner.jpg")
        );
        assert_eq!(source.resolve_image(""), None);
    }

    #[test]
    fn slug_round_trip() {
        assert_eq!(strip_slug("solo-leveling-bahasa-indonesia"), "solo-leveling");
        assert_eq!(full_slug("solo-leveling"), "solo-leveling-bahasa-indonesia");
        assert_eq!(strip_slug("plain"), "plain");
    }

    #[test]
    fn listing_transform_resolves_thumbnail_and_slug() {
        let source = test_source();
        let item = V2ComicItem {
            title: "Solo Leveling".to_string(),
            title_slug: "solo-leveling-bahasa-indonesia".to_string(),
            comic_type: Some("manhwa".to_string()),
            status: Some("ongoing".to_string()),
            gambar: Some("image-cover/solo.jpg".to_string()),
            latest_chapter: Some("179".to_string()),
            updated_at: Some("2024-06-01".to_string()),
            visitor: Some(120_000),
        };

        let listing = source.listing_from_item(item);
        assert_eq!(listing.slug, "solo-leveling");
        assert_eq!(
            listing.url,
            "https://softkomik.com/solo-leveling-bahasa-indonesia"
        );
        assert_eq!(
            listing.thumbnail.as_deref(),
            Some("https://cover.softdevices.my.id/softkomik-cover/image-cover/solo.jpg")
        );
        assert_eq!(listing.comic_type.as_deref(), Some("manhwa"));
    }

    #[test]
    fn next_data_payload_parses() {
        let body = r#"<html><body>
        <script id="__NEXT_DATA__" type="application/json">{"props":{"pageProps":{"data":{"komik":{"title":"Solo Leveling"},"data":{"imageSrc":["NodeJs/solo/1.jpg"]},"prevChapter":[{"chapter":"6"}],"nextChapter":[]}}}}</script>
        </body></html>"#;

        let raw = NEXT_DATA_RE.captures(body).unwrap().get(1).unwrap().as_str();
        let next_data: NextData = serde_json::from_str(raw).unwrap();
        let props: NextChapterProps = serde_json::from_value(next_data.props.page_props).unwrap();

        let response = props.data.expect("chapter payload");
        assert_eq!(response.komik.unwrap().title, "Solo Leveling");
        assert_eq!(response.data.unwrap().image_src.len(), 1);
        assert_eq!(response.prev_chapter[0].chapter, "6");
        assert!(response.next_chapter.is_empty());
    }
}
