//! Scraper-error to HTTP classification.
//!
//! Upstream failures keep their own taxonomy inside the scraper layer; this
//! module decides the outward-facing status code and error code. Not-found
//! codes are resource-qualified from the request path, e.g. a 404 under
//! `/anime/` becomes `ANIME_NOT_FOUND`.

use axum::http::StatusCode;

use crate::scraper::ScraperError;

/// An error classified for the HTTP surface.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Classify a scraper error against the path it occurred on.
    pub fn from_scraper(err: &ScraperError, path: &str) -> Self {
        let (status, code) = match err {
            ScraperError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST".to_string()),
            ScraperError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                format!("{}_NOT_FOUND", resource_from_path(path)),
            ),
            ScraperError::Network(e) if e.is_timeout() => {
                (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT".to_string())
            }
            ScraperError::Network(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR".to_string()),
            ScraperError::Api { status: 429, .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT_EXCEEDED".to_string(),
            ),
            ScraperError::Api { status: 401, .. } => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED".to_string())
            }
            ScraperError::Api { status: 403, .. } => (StatusCode::FORBIDDEN, "FORBIDDEN".to_string()),
            ScraperError::Api { .. } | ScraperError::Parse(_) => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR".to_string())
            }
            ScraperError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR".to_string(),
            ),
        };

        Self::new(status, code, err.to_string())
    }
}

/// Infer the resource name for `*_NOT_FOUND` codes from the request path.
fn resource_from_path(path: &str) -> &'static str {
    if path.contains("/episode/") {
        "EPISODE"
    } else if path.contains("/anime") {
        "ANIME"
    } else if path.contains("/novels/") && path.matches('/').count() > 4 {
        "CHAPTER"
    } else if path.contains("/chapter") {
        "CHAPTER"
    } else if path.contains("/novels") {
        "NOVEL"
    } else if path.contains("/comics") {
        "COMIC"
    } else if path.contains("/genre") {
        "GENRE"
    } else if path.contains("/search") {
        "SEARCH"
    } else if path.contains("/resolve-streaming") {
        "STREAMING"
    } else {
        "RESOURCE"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_code_is_resource_qualified() {
        let err = ScraperError::NotFound("no such page".to_string());

        let api = ApiError::from_scraper(&err, "/api/otakudesu/anime/naruto");
        assert_eq!(api.status, StatusCode::NOT_FOUND);
        assert_eq!(api.code, "ANIME_NOT_FOUND");

        let api = ApiError::from_scraper(&err, "/api/otakudesu/episode/naruto-episode-1");
        assert_eq!(api.code, "EPISODE_NOT_FOUND");

        let api = ApiError::from_scraper(&err, "/api/meio/novels/maou");
        assert_eq!(api.code, "NOVEL_NOT_FOUND");

        let api = ApiError::from_scraper(&err, "/api/meio/novels/maou/volume-1-chapter-0");
        assert_eq!(api.code, "CHAPTER_NOT_FOUND");

        let api = ApiError::from_scraper(&err, "/api/softkomik/comics/solo-leveling");
        assert_eq!(api.code, "COMIC_NOT_FOUND");

        let api = ApiError::from_scraper(&err, "/health");
        assert_eq!(api.code, "RESOURCE_NOT_FOUND");
    }

    #[test]
    fn upstream_statuses_map_through() {
        let err = ScraperError::Api {
            status: 500,
            message: "upstream broke".to_string(),
        };
        let api = ApiError::from_scraper(&err, "/api/kusonime/home");
        assert_eq!(api.status, StatusCode::BAD_GATEWAY);
        assert_eq!(api.code, "UPSTREAM_ERROR");

        let err = ScraperError::Api {
            status: 429,
            message: "slow down".to_string(),
        };
        let api = ApiError::from_scraper(&err, "/api/kusonime/home");
        assert_eq!(api.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(api.code, "RATE_LIMIT_EXCEEDED");
    }

    #[test]
    fn bad_request_maps_to_400() {
        let err = ScraperError::BadRequest("q is required".to_string());
        let api = ApiError::from_scraper(&err, "/api/meio/novels/search");
        assert_eq!(api.status, StatusCode::BAD_REQUEST);
        assert_eq!(api.code, "BAD_REQUEST");
    }
}
