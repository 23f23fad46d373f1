mod clock;
mod config;
mod db;
mod errors;
mod models;
mod routes;
mod search;
mod state;
mod storage;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::db::create_pool;
use crate::routes::build_router;
use crate::search::cache::SearchCache;
use crate::search::engine::SearchEngine;
use crate::state::AppState;
use crate::storage::PgJobStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job search API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Wire the search engine: store + cache + clock, tunables from config
    let store = Arc::new(PgJobStore::new(db));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = SearchCache::new(
        Duration::from_secs(config.search_cache_ttl_secs),
        clock.clone(),
    );
    let engine = SearchEngine::new(store, cache, clock, config.search_overfetch_factor);
    info!(
        "Search engine initialized (cache ttl: {}s, over-fetch: {}x)",
        config.search_cache_ttl_secs, config.search_overfetch_factor
    );

    // Build app state
    let state = AppState {
        engine,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
