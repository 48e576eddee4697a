use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::Response,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{Ctx, response::RequestMeta, scraper::Genre};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    #[serde(rename = "dataContent")]
    pub data_content: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenresResponse {
    genres: Vec<Genre>,
}

/// GET /api/otakudesu/home
async fn home(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.otakudesu.home().await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/otakudesu/ongoing?page=...
async fn ongoing(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Query(params): Query<PageQuery>,
) -> Response {
    match ctx
        .sources
        .otakudesu
        .ongoing(params.page.unwrap_or(1))
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/otakudesu/complete?page=...
async fn complete(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Query(params): Query<PageQuery>,
) -> Response {
    match ctx
        .sources
        .otakudesu
        .complete(params.page.unwrap_or(1))
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/otakudesu/anime-list
async fn anime_list(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.otakudesu.anime_index().await {
        Ok(list) => meta.success(serde_json::json!({ "list": list })),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/otakudesu/anime/{slug}
async fn anime_detail(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(slug): Path<String>,
) -> Response {
    match ctx.sources.otakudesu.anime_detail(&slug).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/otakudesu/episode/{slug}
async fn episode(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(slug): Path<String>,
) -> Response {
    match ctx.sources.otakudesu.episode(&slug).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/otakudesu/genres
async fn genres(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.otakudesu.genres().await {
        Ok(genres) => meta.success(GenresResponse { genres }),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/otakudesu/genres/{genre}?page=...
async fn anime_by_genre(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(genre): Path<String>,
    Query(params): Query<PageQuery>,
) -> Response {
    match ctx
        .sources
        .otakudesu
        .anime_by_genre(&genre, params.page.unwrap_or(1))
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/otakudesu/schedule
async fn schedule(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.otakudesu.schedule().await {
        Ok(schedule) => meta.success(serde_json::json!({ "schedule": schedule })),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/otakudesu/search?q=...
async fn search(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Query(params): Query<SearchQuery>,
) -> Response {
    match ctx
        .sources
        .otakudesu
        .search(params.q.as_deref().unwrap_or_default())
        .await
    {
        Ok(anime) => meta.success(serde_json::json!({ "anime": anime })),
        Err(e) => meta.failure(&e),
    }
}

/// POST /api/otakudesu/resolve-streaming
async fn resolve_streaming(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Json(request): Json<ResolveRequest>,
) -> Response {
    let Some(data_content) = request.data_content.filter(|d| !d.is_empty()) else {
        return meta.bad_request("dataContent is required");
    };

    match ctx.sources.otakudesu.resolve_streaming(&data_content).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/otakudesu/resolve-streaming/{dataContent}
async fn resolve_streaming_path(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(data_content): Path<String>,
) -> Response {
    match ctx.sources.otakudesu.resolve_streaming(&data_content).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// Mount otakudesu routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/home", get(home))
        .route("/ongoing", get(ongoing))
        .route("/complete", get(complete))
        .route("/anime-list", get(anime_list))
        .route("/anime/{slug}", get(anime_detail))
        .route("/episode/{slug}", get(episode))
        .route("/genres", get(genres))
        .route("/genres/{genre}", get(anime_by_genre))
        .route("/schedule", get(schedule))
        .route("/search", get(search))
        .route("/resolve-streaming", post(resolve_streaming))
        .route("/resolve-streaming/{data_content}", get(resolve_streaming_path))
}
