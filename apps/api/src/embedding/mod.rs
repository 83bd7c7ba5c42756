//! Embedding Provider — the abstraction over text-embedding models.
//!
//! Two independently configured instances are wired into `AppState`: a fast
//! model for section-heading detection and an advanced model for JD/resume
//! similarity scoring. The trait keeps the pipeline testable with a
//! deterministic fake provider, no real model required.

use async_trait::async_trait;
use thiserror::Error;

pub mod http;

#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Embedding API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Embedding API returned {got} vectors for {expected} inputs")]
    CountMismatch { expected: usize, got: usize },
}

/// A text-embedding model. `embed_many` must return one vector per input,
/// in input order, and be deterministic for identical input within a run.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    async fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError>;
}

/// Cosine similarity on raw (non-normalized) vectors: dot product over the
/// product of norms. No clamping — a value marginally outside [-1, 1] from
/// floating error passes through unchanged.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors_is_one() {
        let v = vec![0.3, 0.5, 0.1];
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn test_cosine_orthogonal_vectors_is_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_opposite_vectors_is_negative_one() {
        let a = vec![1.0, 2.0];
        let b = vec![-1.0, -2.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim + 1.0).abs() < 1e-6, "got {sim}");
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        let a = vec![0.0, 0.0];
        let b = vec![1.0, 1.0];
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn test_cosine_ignores_magnitude() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![10.0, 20.0, 30.0];
        let sim = cosine_similarity(&a, &b);
        assert!((sim - 1.0).abs() < 1e-6, "got {sim}");
    }

    #[tokio::test]
    async fn test_fake_embedder_is_deterministic() {
        let fake = testing::FakeEmbedder::new();
        let a = fake.embed("Experience").await.unwrap();
        let b = fake.embed("Experience").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_fake_embedder_batch_matches_order_and_count() {
        let fake = testing::FakeEmbedder::new();
        let texts = vec!["one".to_string(), "two".to_string(), "three".to_string()];
        let vectors = fake.embed_many(&texts).await.unwrap();
        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[1], fake.embed("two").await.unwrap());
    }
}
