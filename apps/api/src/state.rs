use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::vectorizer::TfidfVectorizer;
use crate::visits::VisitCounter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pre-trained TF-IDF model. Loaded once at startup, never mutated.
    pub vectorizer: Arc<TfidfVectorizer>,
    /// Posting catalog. Loaded once at startup, read-only for the process lifetime.
    pub catalog: Arc<Catalog>,
    /// Flat-file visit counter — the only mutable shared state.
    pub visits: VisitCounter,
    #[allow(dead_code)]
    pub config: Config,
}
