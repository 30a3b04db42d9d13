use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movie_recs::{
    api::{create_router, AppState},
    config::Config,
    services::{
        providers::{PosterSource, TmdbClient},
        PosterResolver, Recommender, RetryPolicy,
    },
    store::{Catalog, PosterCache},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_recs=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Datasets are required; a load failure ends the process
    let catalog = Catalog::load(&config.catalog_path, &config.similarity_path)
        .context("Failed to load datasets")?;

    let source: Arc<dyn PosterSource> = Arc::new(TmdbClient::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.image_base_url.clone(),
        config.request_timeout(),
    )?);

    tracing::info!(
        provider = source.name(),
        max_attempts = config.max_attempts,
        timeout_secs = config.request_timeout_secs,
        "Poster source configured"
    );

    let resolver = PosterResolver::new(source, PosterCache::new(), RetryPolicy::from_config(&config));
    let recommender = Recommender::new(Arc::new(catalog), Arc::new(resolver));
    let state = AppState::new(
        recommender,
        config.default_recommendations,
        config.max_recommendations,
    );

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
