use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub embeddings_base_url: String,
    pub embeddings_api_key: Option<String>,
    /// Lightweight model used for section-heading detection.
    pub embedding_model_fast: String,
    /// Higher-quality model used for JD/resume similarity scoring.
    pub embedding_model_advanced: String,
    /// Cosine-similarity cutoff above which a line counts as a section heading.
    pub section_similarity_threshold: f32,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            embeddings_base_url: require_env("EMBEDDINGS_BASE_URL")?,
            embeddings_api_key: std::env::var("EMBEDDINGS_API_KEY").ok(),
            embedding_model_fast: std::env::var("EMBEDDING_MODEL_FAST")
                .unwrap_or_else(|_| "all-MiniLM-L6-v2".to_string()),
            embedding_model_advanced: std::env::var("EMBEDDING_MODEL_ADVANCED")
                .unwrap_or_else(|_| "all-mpnet-base-v2".to_string()),
            section_similarity_threshold: std::env::var("SECTION_SIMILARITY_THRESHOLD")
                .unwrap_or_else(|_| "0.7".to_string())
                .parse::<f32>()
                .context("SECTION_SIMILARITY_THRESHOLD must be a float")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
