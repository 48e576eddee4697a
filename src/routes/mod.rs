pub mod api;

use axum::{Router, http::StatusCode, response::Response};

use crate::{Ctx, error::ApiError, response::RequestMeta};

/// Build the full application router.
pub fn router(ctx: Ctx) -> Router {
    Router::new()
        .merge(api::mount())
        .fallback(not_found)
        .with_state(ctx)
}

async fn not_found(meta: RequestMeta) -> Response {
    meta.render_error(&ApiError::new(
        StatusCode::NOT_FOUND,
        "RESOURCE_NOT_FOUND",
        "Route not found",
    ))
}
