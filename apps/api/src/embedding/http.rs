//! HTTP embedding provider against an OpenAI-compatible `/v1/embeddings`
//! endpoint (works with OpenAI, TEI, LocalAI and similar servers).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{EmbedError, EmbeddingProvider};

/// Maximum characters sent per input. Sentence-transformer style models
/// truncate long inputs anyway; capping client-side keeps request bodies
/// bounded for resumes with very long sections.
const MAX_EMBED_CHARS: usize = 8_000;
const BATCH_SIZE: usize = 64;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: Vec<&'a str>,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedData>,
}

#[derive(Deserialize)]
struct EmbedData {
    embedding: Vec<f32>,
}

/// One configured embedding model behind an HTTP endpoint.
/// The service holds two of these: fast (segmentation) and advanced (scoring).
#[derive(Clone)]
pub struct HttpEmbeddingProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl HttpEmbeddingProvider {
    pub fn new(base_url: String, api_key: Option<String>, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn embed_chunk(&self, chunk: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        let url = format!("{}/v1/embeddings", self.base_url.trim_end_matches('/'));
        let request_body = EmbedRequest {
            model: &self.model,
            input: chunk.iter().map(|t| truncate_for_embedding(t)).collect(),
        };

        let mut request = self.client.post(&url).json(&request_body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: EmbedResponse = response.json().await?;
        debug!(
            "Embedded {} texts with {} ({} vectors)",
            chunk.len(),
            self.model,
            body.data.len()
        );

        Ok(body.data.into_iter().map(|d| d.embedding).collect())
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let texts = [text.to_string()];
        let vectors = self.embed_many(&texts).await?;
        vectors.into_iter().next().ok_or(EmbedError::CountMismatch {
            expected: 1,
            got: 0,
        })
    }

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut all_vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(BATCH_SIZE) {
            all_vectors.extend(self.embed_chunk(chunk).await?);
        }

        if all_vectors.len() != texts.len() {
            return Err(EmbedError::CountMismatch {
                expected: texts.len(),
                got: all_vectors.len(),
            });
        }

        Ok(all_vectors)
    }
}

/// Truncates to at most `MAX_EMBED_CHARS`, splitting on a UTF-8 char boundary.
fn truncate_for_embedding(text: &str) -> &str {
    if text.len() <= MAX_EMBED_CHARS {
        return text;
    }
    let mut end = MAX_EMBED_CHARS;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
