use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use otakuhub::{AppConfig, Ctx, config::LoggingConfig, routes};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;
    let _guard = init_tracing(&config.logging)?;

    let ctx = Ctx::new(&config);

    let app = routes::router(ctx)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}

/// Set up console logging, plus daily-rotated file logging when a log
/// directory is configured. The returned guard must live as long as the
/// process so buffered file output is flushed.
fn init_tracing(config: &LoggingConfig) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "otakuhub={level},tower_http=warn,hyper=warn,reqwest=warn",
            level = config.level
        ))
    });

    let console_layer = fmt::layer().with_target(true).boxed();

    let mut layers = vec![console_layer];
    let mut guard = None;

    if !config.dir.is_empty() {
        std::fs::create_dir_all(&config.dir)
            .with_context(|| format!("Failed to create log directory: {}", config.dir))?;

        let appender = tracing_appender::rolling::daily(&config.dir, "otakuhub");
        let (writer, worker_guard) = tracing_appender::non_blocking(appender);
        guard = Some(worker_guard);

        let file_layer = if config.json {
            fmt::layer().json().with_writer(writer).boxed()
        } else {
            fmt::layer().with_ansi(false).with_writer(writer).boxed()
        };
        layers.push(file_layer);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    Ok(guard)
}
