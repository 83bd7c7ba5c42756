use std::sync::Arc;

use crate::config::Config;
use crate::embedding::EmbeddingProvider;
use crate::matching::summarize::Summarizer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Fast model — section-heading detection only.
    pub fast_embedder: Arc<dyn EmbeddingProvider>,
    /// Advanced model — JD/resume similarity scoring.
    pub scoring_embedder: Arc<dyn EmbeddingProvider>,
    pub summarizer: Arc<dyn Summarizer>,
    pub config: Config,
}
