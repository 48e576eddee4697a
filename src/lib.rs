pub mod config;
pub mod error;
pub mod response;
pub mod routes;
pub mod scraper;

pub use config::AppConfig;
pub use error::ApiError;
pub use response::{ApiErrorResponse, ApiResponse, RequestMeta};

use std::sync::Arc;

use crate::scraper::{
    KusonimeSource, MeioSource, OtakudesuSource, ResponseCache, SoftkomikSource, SourceRegistry,
};

/// Shared application state handed to every route handler.
#[derive(Clone)]
pub struct Ctx {
    pub sources: Arc<Sources>,
    pub registry: Arc<SourceRegistry>,
    pub cache: ResponseCache,
}

/// Concrete handles to every upstream source.
pub struct Sources {
    pub otakudesu: Arc<OtakudesuSource>,
    pub kusonime: Arc<KusonimeSource>,
    pub meio: Arc<MeioSource>,
    pub softkomik: Arc<SoftkomikSource>,
}

impl Ctx {
    pub fn new(config: &AppConfig) -> Self {
        let cache = ResponseCache::with_config(config.cache.clone().into());

        let sources = Arc::new(Sources {
            otakudesu: Arc::new(OtakudesuSource::new(&config.sources.otakudesu, cache.clone())),
            kusonime: Arc::new(KusonimeSource::new(&config.sources.kusonime, cache.clone())),
            meio: Arc::new(MeioSource::new(&config.sources.meio, cache.clone())),
            softkomik: Arc::new(SoftkomikSource::new(&config.sources.softkomik, cache.clone())),
        });

        let registry = Arc::new(scraper::create_default_registry(&sources));

        Self {
            sources,
            registry,
            cache,
        }
    }
}
