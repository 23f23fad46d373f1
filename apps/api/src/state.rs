use crate::config::Config;
use crate::search::engine::SearchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub engine: SearchEngine,
    pub config: Config,
}
