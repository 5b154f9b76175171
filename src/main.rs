use std::sync::Arc;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use tvtrack_api::{
    config::Config,
    db::{
        self, Cache, CacheWriterHandle, CommentRepository, InMemoryStore, PgStore,
        WatchedEpisodeRepository,
    },
    routes::{create_router, AppState},
    services::{HuggingFaceGenerator, TvMazeCatalog},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tvtrack_api=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;

    let (comment_repo, watched_repo) = storage(&config).await?;

    let (cache, cache_handle) = match config.redis_url.as_deref() {
        Some(url) => {
            let (cache, handle) = Cache::new(db::create_redis_client(url)?);
            tracing::info!("Catalog cache enabled");
            (Some(cache), Some(handle))
        }
        None => {
            tracing::info!("REDIS_URL not set, catalog cache disabled");
            (None, None)
        }
    };

    let catalog = TvMazeCatalog::new(
        cache,
        config.tvmaze_api_url.clone(),
        config.catalog_timeout(),
    )?;
    let generator = HuggingFaceGenerator::new(
        config.huggingface_api_key.clone(),
        config.huggingface_api_url.clone(),
        config.huggingface_model.clone(),
        config.insight_timeout(),
    )?;

    if config.huggingface_api_key.is_none() {
        tracing::warn!("HUGGINGFACE_API_KEY not set, insights will use templated fallbacks");
    }

    let state = AppState::new(
        Arc::new(catalog),
        comment_repo,
        watched_repo,
        Arc::new(generator),
        config.insight_fallback_enabled,
    );

    let app = create_router(state).layer(cors_layer(&config.cors_origins));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_handle {
        flush_cache(handle).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

/// Postgres when `DATABASE_URL` is set, otherwise an in-memory store
async fn storage(
    config: &Config,
) -> anyhow::Result<(Arc<dyn CommentRepository>, Arc<dyn WatchedEpisodeRepository>)> {
    match config.database_url.as_deref() {
        Some(url) => {
            let pool = db::create_pool(url).await?;
            db::run_migrations(&pool).await?;
            tracing::info!("Connected to PostgreSQL");

            let store = PgStore::new(pool);
            Ok((Arc::new(store.clone()), Arc::new(store)))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, comments and watched episodes are kept in memory");
            let store = InMemoryStore::new();
            Ok((Arc::new(store.clone()), Arc::new(store)))
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

async fn flush_cache(handle: CacheWriterHandle) {
    handle.shutdown().await;
    // Give the writer a moment to drain queued writes
    tokio::time::sleep(std::time::Duration::from_millis(200)).await;
}
