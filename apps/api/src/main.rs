mod catalog;
mod config;
mod errors;
mod extract;
mod matching;
mod routes;
mod state;
mod vectorizer;
mod visits;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::vectorizer::TfidfVectorizer;
use crate::visits::VisitCounter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS match API v{}", env!("CARGO_PKG_VERSION"));

    // One-time artifact loads: both are cached for the process lifetime and
    // never reloaded per request.
    let vectorizer = TfidfVectorizer::load(&config.vectorizer_path)
        .context("failed to load vectorizer artifact")?;
    info!("Vectorizer loaded ({} terms)", vectorizer.dimensions());

    let catalog =
        Catalog::load(&config.catalog_path).context("failed to load posting catalog")?;
    info!("Posting catalog loaded ({} postings)", catalog.len());
    if catalog.is_empty() {
        warn!("posting catalog is empty; match requests will return no results");
    }

    let visits = VisitCounter::new(&config.visits_path);

    // Build app state
    let state = AppState {
        vectorizer: Arc::new(vectorizer),
        catalog: Arc::new(catalog),
        visits,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
