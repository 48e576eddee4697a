use axum::{Router, response::Response, routing::get};
use serde::Serialize;

use crate::{Ctx, response::RequestMeta};

#[derive(Debug, Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

/// Liveness probe
/// GET /health
async fn health(meta: RequestMeta) -> Response {
    meta.success(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Mount health routes
pub fn mount() -> Router<Ctx> {
    Router::new().route("/health", get(health))
}
