mod config;
mod embedding;
mod errors;
mod extract;
mod llm_client;
mod matching;
mod models;
mod ranking;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding::http::HttpEmbeddingProvider;
use crate::llm_client::LlmClient;
use crate::matching::summarize::LlmSummarizer;
use crate::routes::build_router;
use crate::state::AppState;

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

    info!("Starting resume ranking API v{}", env!("CARGO_PKG_VERSION"));

    // Two independently configured embedding models: a fast one for
    // section-heading detection and an advanced one for similarity scoring.
    let fast_embedder = Arc::new(HttpEmbeddingProvider::new(
        config.embeddings_base_url.clone(),
        config.embeddings_api_key.clone(),
        config.embedding_model_fast.clone(),
    ));
    let scoring_embedder = Arc::new(HttpEmbeddingProvider::new(
        config.embeddings_base_url.clone(),
        config.embeddings_api_key.clone(),
        config.embedding_model_advanced.clone(),
    ));
    info!(
        "Embedding providers initialized (fast: {}, scoring: {})",
        fast_embedder.model(),
        scoring_embedder.model()
    );

    // Initialize the Claude-backed section summarizer
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    let summarizer = Arc::new(LlmSummarizer::new(llm));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Build app state
    let state = AppState {
        fast_embedder,
        scoring_embedder,
        summarizer,
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
