use axum::{
    Router,
    extract::{Path, Query, State},
    response::Response,
    routing::get,
};
use serde::Deserialize;

use crate::{Ctx, response::RequestMeta};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// GET /api/softkomik/home/new
async fn new_comics(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.softkomik.new_comics().await {
        Ok(comics) => meta.success(serde_json::json!({
            "count": comics.len(),
            "comics": comics,
        })),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/softkomik/home/latest
async fn latest_updates(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    match ctx.sources.softkomik.latest_updates().await {
        Ok(comics) => meta.success(serde_json::json!({
            "count": comics.len(),
            "comics": comics,
        })),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/softkomik/comics?page=...&search=...
async fn comic_list(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Query(params): Query<ListQuery>,
) -> Response {
    match ctx
        .sources
        .softkomik
        .comic_list(params.page.unwrap_or(1), params.search.as_deref())
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/softkomik/comics/{slug}
async fn comic_detail(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(slug): Path<String>,
) -> Response {
    match ctx.sources.softkomik.comic_detail(&slug).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/softkomik/comics/{slug}/chapters
async fn chapter_list(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(slug): Path<String>,
) -> Response {
    match ctx.sources.softkomik.chapter_list(&slug).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/softkomik/comics/{slug}/chapter/{chapter}
async fn chapter_images(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path((slug, chapter)): Path<(String, String)>,
) -> Response {
    match ctx.sources.softkomik.chapter_images(&slug, &chapter).await {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/softkomik/genres
async fn genres(State(ctx): State<Ctx>, meta: RequestMeta) -> Response {
    let genres = ctx.sources.softkomik.genres();
    meta.success(serde_json::json!({
        "count": genres.len(),
        "genres": genres,
    }))
}

/// GET /api/softkomik/type/{type}?page=...
async fn by_type(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(comic_type): Path<String>,
    Query(params): Query<PageQuery>,
) -> Response {
    match ctx
        .sources
        .softkomik
        .by_type(&comic_type, params.page.unwrap_or(1))
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// GET /api/softkomik/genre/{genre}?page=...
async fn by_genre(
    State(ctx): State<Ctx>,
    meta: RequestMeta,
    Path(genre): Path<String>,
    Query(params): Query<PageQuery>,
) -> Response {
    match ctx
        .sources
        .softkomik
        .by_genre(&genre, params.page.unwrap_or(1))
        .await
    {
        Ok(data) => meta.success(data),
        Err(e) => meta.failure(&e),
    }
}

/// Mount softkomik routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .route("/home/new", get(new_comics))
        .route("/home/latest", get(latest_updates))
        .route("/comics", get(comic_list))
        .route("/comics/{slug}", get(comic_detail))
        .route("/comics/{slug}/chapters", get(chapter_list))
        .route("/comics/{slug}/chapter/{chapter}", get(chapter_images))
        .route("/genres", get(genres))
        .route("/type/{type}", get(by_type))
        .route("/genre/{genre}", get(by_genre))
}
