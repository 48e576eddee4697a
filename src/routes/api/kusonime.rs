use axum::{
    Router,
    extract::{Path, Query, State},
    response::Response,
    routing::get,
};
use serde::Deserialize;

use crate::{Ctx, response::RequestMeta};

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
}

/// GET /api/kusonime/home
async fn home(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.kusonime.home().await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/kusonime/latest?page=...
async fn latest(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Query(params): Query<PageQuery>,
) -> Response {
    match ctx.sources.kusonime.latest(params.page.unwrap_or(1)).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/kusonime/anime-list
async fn anime_list(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.kusonime.anime_index().await {
        Ok(list) => meta.success(serde_json::json!({ "list": list })),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/kusonime/anime/{slug}
async fn anime_detail(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(slug): Path<String>,
) -> Response {
    match ctx.sources.kusonime.anime_detail(&slug).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/kusonime/genres
async fn genres(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.kusonime.genres().await {
        Ok(genres) => meta.success(serde_json::json!({ "genres": genres })),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/kusonime/genres/{genre}?page=...
async fn anime_by_genre(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(genre): Path<String>,
    Query(params): Query<PageQuery>,
) -> Response {
    match ctx
        .sources
        .kusonime
        .anime_by_genre(&genre, params.page.unwrap_or(1))
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/kusonime/seasons
async fn seasons(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.kusonime.seasons().await {
        Ok(seasons) => meta.success(serde_json::json!({ "seasons": seasons })),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/kusonime/seasons/{season}?page=...
async fn anime_by_season(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(season): Path<String>,
    Query(params): Query<PageQuery>,
) -> Response {
    match ctx
        .sources
        .kusonime
        .anime_by_season(&season, params.page.unwrap_or(1))
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/kusonime/search?q=...&page=...
async fn search(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Query(params): Query<SearchQuery>,
) -> Response {
    match ctx
        .sources
        .kusonime
        .search(
            params.q.as_deref().unwrap_or_default(),
            params.page.unwrap_or(1),
        )
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// Mount kusonime routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/home", get(home))
        .route("/latest", get(latest))
        .route("/anime-list", get(anime_list))
        .route("/anime/{slug}", get(anime_detail))
        .route("/genres", get(genres))
        .route("/genres/{genre}", get(anime_by_genre))
        .route("/seasons", get(seasons))
        .route("/seasons/{season}", get(anime_by_season))
        .route("/search", get(search))
}
