//! Uniform response envelope.
//!
//! Every endpoint wraps its payload in the same success/error JSON shape:
//! status, message, RFC 3339 timestamp, request path and elapsed time for
//! successes; a machine-readable error code for failures.

use std::convert::Infallible;
use std::time::Instant;

use axum::{
    Json,
    extract::{FromRequestParts, OriginalUri},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::error::ApiError;
use crate::scraper::ScraperError;

/// Successful response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub data: T,
    pub timestamp: String,
    pub path: String,
    pub response_time: String,
}

/// Error response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub error: ErrorBody,
    pub timestamp: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
}

/// Per-request metadata captured before the handler runs: the original
/// request path (nested routers strip their prefix from `Uri`) and a start
/// instant for the `responseTime` field.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub path: String,
    started: Instant,
}

impl<S> FromRequestParts<S> for RequestMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let path = parts
            .extensions
            .get::<OriginalUri>()
            .map(|uri| uri.path().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        Ok(Self {
            path,
            started: Instant::now(),
        })
    }
}

impl RequestMeta {
    #[cfg(test)]
    pub fn for_path(path: &str) -> Self {
        Self {
            path: path.to_string(),
            started: Instant::now(),
        }
    }

    /// Wrap a payload in the success envelope.
    pub fn success<T: Serialize>(&self, data: T) -> Response {
        let response_time = format!("{}ms", self.started.elapsed().as_millis());

        let body = ApiResponse {
            success: true,
            status_code: 200,
            message: "OK".to_string(),
            data,
            timestamp: now_rfc3339(),
            path: self.path.clone(),
            response_time: response_time.clone(),
        };

        ([("X-Response-Time", response_time)], Json(body)).into_response()
    }

    /// Map a scraper error to its HTTP status and error-code envelope.
    pub fn failure(&self, err: &ScraperError) -> Response {
        let api_err = ApiError::from_scraper(err, &self.path);
        self.render_error(&api_err)
    }

    /// Render an already-classified error.
    pub fn render_error(&self, err: &ApiError) -> Response {
        if err.status.is_server_error() {
            tracing::warn!(path = %self.path, code = %err.code, "{}", err.message);
        }

        let body = ApiErrorResponse {
            success: false,
            status_code: err.status.as_u16(),
            message: err.message.clone(),
            error: ErrorBody {
                code: err.code.clone(),
            },
            timestamp: now_rfc3339(),
            path: self.path.clone(),
        };

        (err.status, Json(body)).into_response()
    }

    /// Shorthand for a 400 with `BAD_REQUEST`.
    pub fn bad_request(&self, message: impl Into<String>) -> Response {
        self.render_error(&ApiError::new(
            StatusCode::BAD_REQUEST,
            "BAD_REQUEST",
            message,
        ))
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let meta = RequestMeta::for_path("/api/meio/novels");
        let body = ApiResponse {
            success: true,
            status_code: 200,
            message: "OK".to_string(),
            data: serde_json::json!({"novels": []}),
            timestamp: now_rfc3339(),
            path: meta.path.clone(),
            response_time: "3ms".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["path"], "/api/meio/novels");
        assert!(json["responseTime"].as_str().unwrap().ends_with("ms"));
        assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn error_envelope_shape() {
        let body = ApiErrorResponse {
            success: false,
            status_code: 404,
            message: "Anime not found".to_string(),
            error: ErrorBody {
                code: "ANIME_NOT_FOUND".to_string(),
            },
            timestamp: now_rfc3339(),
            path: "/api/otakudesu/anime/x".to_string(),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "ANIME_NOT_FOUND");
        assert_eq!(json["statusCode"], 404);
    }
}
