use axum::Router;

use crate::Ctx;

pub mod health;
pub mod kusonime;
pub mod meio;
pub mod otakudesu;
pub mod softkomik;
pub mod sources;

/// Mount all API routes
pub fn mount() -> Router<Ctx> {
    Router::new()
        .merge(health::mount())
        .merge(sources::mount())
        .nest("/api/otakudesu", otakudesu::mount())
        .nest("/api/kusonime", kusonime::mount())
        .nest("/api/meio", meio::mount())
        .nest("/api/softkomik", softkomik::mount())
}
