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
}

/// GET /api/meio/novels?page=...
async fn novel_list(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Query(params): Query<PageQuery>,
) -> Response {
    match ctx.sources.meio.novel_list(params.page.unwrap_or(1)).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/meio/novels/latest
async fn latest(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.meio.latest().await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/meio/novels/search?q=...
async fn search(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Query(params): Query<SearchQuery>,
) -> Response {
    match ctx
        .sources
        .meio
        .search(params.q.as_deref().unwrap_or_default())
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/meio/novels/{slug}
async fn novel_detail(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(slug): Path<String>,
) -> Response {
    match ctx.sources.meio.novel_detail(&slug).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/meio/novels/{slug}/chapters
async fn chapter_list(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(slug): Path<String>,
) -> Response {
    match ctx.sources.meio.chapter_list(&slug).await {
        Ok(chapters) => meta.success(serde_json::json!({ "chapters": chapters })),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/meio/novels/{slug}/{chapter}
///
/// Chapter slugs may contain volume segments, so the chapter part is a
/// wildcard rather than a single path parameter.
async fn chapter_content(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path((slug, chapter)): Path<(String, String)>,
) -> Response {
    match ctx.sources.meio.chapter_content(&slug, &chapter).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/meio/genres
async fn genres(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.meio.genres().await {
        Ok(genres) => meta.success(serde_json::json!({ "genres": genres })),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/meio/genres/{genre}?page=...
async fn novels_by_genre(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(genre): Path<String>,
    Query(params): Query<PageQuery>,
) -> Response {
    match ctx
        .sources
        .meio
        .novels_by_genre(&genre, params.page.unwrap_or(1))
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// Mount meio routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/novels", get(novel_list))
        .route("/novels/latest", get(latest))
        .route("/novels/search", get(search))
        .route("/novels/{slug}", get(novel_detail))
        .route("/novels/{slug}/chapters", get(chapter_list))
        .route("/novels/{slug}/{*chapter}", get(chapter_content))
        .route("/genres", get(genres))
        .route("/genres/{genre}", get(novels_by_genre))
}
