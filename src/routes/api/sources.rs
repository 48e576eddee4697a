use axum::{
    Router,
    extract::{Query, State},
    response::Response,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    Ctx,
    response::RequestMeta,
    scraper::{CacheStats, MediaCard},
};

/// Source info
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    pub base_url: String,
    pub kind: String,
}

#[derive(Debug, Serialize)]
pub struct SourcesResponse {
    pub sources: Vec<SourceInfo>,
    pub cache: CacheStats,
}

/// Cross-source search parameters
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<MediaCard>,
    pub total: usize,
}

/// List available sources
/// GET /api/sources
async fn list_sources(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    let sources = ctx
        .registry
        .sources()
        .iter()
        .map(|s| SourceInfo {
            id: s.id().to_string(),
            name: s.name().to_string(),
            base_url: s.base_url().to_string(),
            kind: s.kind().to_string(),
        })
        .collect();

    meta.success(SourcesResponse {
        sources,
        cache: ctx.cache.stats(),
    })
}

/// Search every source at once
/// GET /api/search?q=...&page=...
async fn search_all(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Query(params): Query<SearchQuery>,
) -> Response {
    let query = params.q.unwrap_or_default();
    if query.trim().is_empty() {
        return meta.bad_request("Query 'q' is required");
    }

    match ctx
        .registry
        .search_all(&query, params.page.unwrap_or(1))
        .await
    {
        Ok(results) => {
            let total = results.len();
            meta.success(SearchResponse { results, total })
        }
        Err(e) => meta.failure(&e),
    }
}

/// Mount source discovery routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/api/sources", get(list_sources))
        .route("/api/search", get(search_all))
}
