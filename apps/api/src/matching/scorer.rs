//! Similarity Scorer — cosine similarity of (summarized) sections and the
//! full resume text against the job description, aggregated into one
//! combined score per resume.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::embedding::{cosine_similarity, EmbedError, EmbeddingProvider};
use crate::matching::segmenter::SectionMap;

/// Per-resume similarity scores. Built once, read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreSet {
    /// Canonical section name → cosine similarity against the JD.
    pub section_scores: BTreeMap<String, f32>,
    /// Mean over present sections; 0 when no sections were detected.
    pub average_score: f32,
    pub full_text_similarity: f32,
    /// Equal-weighted mean of `average_score` and `full_text_similarity`.
    pub combined_score: f32,
}

pub struct SimilarityScorer {
    embedder: Arc<dyn EmbeddingProvider>,
}

impl SimilarityScorer {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self { embedder }
    }

    /// Embeds the job description once per ranking run. The returned vector
    /// is shared read-only by every resume in the run so all comparisons use
    /// a bit-identical JD embedding.
    pub async fn embed_job_description(&self, jd_text: &str) -> Result<Vec<f32>, EmbedError> {
        self.embedder.embed(jd_text).await
    }

    /// Scores one resume: each summarized section and the full original text
    /// against the shared JD embedding. Raw vectors, no clamping.
    pub async fn score(
        &self,
        jd_embedding: &[f32],
        summarized_sections: &SectionMap,
        full_text: &str,
    ) -> Result<ScoreSet, EmbedError> {
        let names: Vec<&String> = summarized_sections.keys().collect();
        let contents: Vec<String> = summarized_sections.values().cloned().collect();
        let section_embeddings = self.embedder.embed_many(&contents).await?;

        let mut section_scores = BTreeMap::new();
        for (name, embedding) in names.iter().zip(section_embeddings.iter()) {
            section_scores.insert(
                (*name).clone(),
                cosine_similarity(embedding, jd_embedding),
            );
        }

        // Deliberate low-score policy for resumes with no detected sections,
        // not an error.
        let average_score = if section_scores.is_empty() {
            0.0
        } else {
            section_scores.values().sum::<f32>() / section_scores.len() as f32
        };

        let full_text_embedding = self.embedder.embed(full_text).await?;
        let full_text_similarity = cosine_similarity(&full_text_embedding, jd_embedding);

        let combined_score = (average_score + full_text_similarity) / 2.0;

        Ok(ScoreSet {
            section_scores,
            average_score,
            full_text_similarity,
            combined_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::{unit, FakeEmbedder, FAKE_DIM};

    const JD: &str = "Senior Rust engineer, distributed systems";

    /// Vector with cosine similarity `sim` against `unit(64)` (the JD axis).
    fn at_angle(sim: f32) -> Vec<f32> {
        let mut v = vec![0.0; FAKE_DIM];
        v[64] = sim;
        v[65] = (1.0 - sim * sim).sqrt();
        v
    }

    fn section_map(entries: &[(&str, &str)]) -> SectionMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn scorer_with(fake: FakeEmbedder) -> SimilarityScorer {
        SimilarityScorer::new(Arc::new(fake.with_fixed(JD, unit(64))))
    }

    #[tokio::test]
    async fn test_scores_sections_and_full_text() {
        let fake = FakeEmbedder::new()
            .with_fixed("exp summary", at_angle(0.8))
            .with_fixed("edu summary", at_angle(0.4))
            .with_fixed("full resume text", at_angle(0.5));
        let scorer = scorer_with(fake);

        let jd = scorer.embed_job_description(JD).await.unwrap();
        let sections = section_map(&[("Experience", "exp summary"), ("Education", "edu summary")]);
        let scores = scorer.score(&jd, &sections, "full resume text").await.unwrap();

        assert!((scores.section_scores["Experience"] - 0.8).abs() < 1e-5);
        assert!((scores.section_scores["Education"] - 0.4).abs() < 1e-5);
        assert!((scores.average_score - 0.6).abs() < 1e-5);
        assert!((scores.full_text_similarity - 0.5).abs() < 1e-5);
        assert!((scores.combined_score - 0.55).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_empty_section_map_scores_zero_average() {
        let fake = FakeEmbedder::new().with_fixed("whole text", at_angle(0.6));
        let scorer = scorer_with(fake);

        let jd = scorer.embed_job_description(JD).await.unwrap();
        let scores = scorer
            .score(&jd, &SectionMap::new(), "whole text")
            .await
            .unwrap();

        assert_eq!(scores.average_score, 0.0);
        assert!((scores.full_text_similarity - 0.6).abs() < 1e-5);
        // Combined is the full-text score halved.
        assert!((scores.combined_score - 0.3).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_combined_is_exact_mean_of_components() {
        let fake = FakeEmbedder::new()
            .with_fixed("s", at_angle(0.9))
            .with_fixed("t", at_angle(0.1));
        let scorer = scorer_with(fake);

        let jd = scorer.embed_job_description(JD).await.unwrap();
        let scores = scorer
            .score(&jd, &section_map(&[("Skills", "s")]), "t")
            .await
            .unwrap();

        assert_eq!(
            scores.combined_score,
            (scores.average_score + scores.full_text_similarity) / 2.0
        );
    }

    #[tokio::test]
    async fn test_jd_embedding_is_identical_across_resumes() {
        let scorer = scorer_with(FakeEmbedder::new());
        let a = scorer.embed_job_description(JD).await.unwrap();
        let b = scorer.embed_job_description(JD).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_negative_similarity_passes_through_unclamped() {
        let fake = FakeEmbedder::new()
            .with_fixed("hostile", {
                let mut v = vec![0.0; FAKE_DIM];
                v[64] = -1.0;
                v
            })
            .with_fixed("t", at_angle(0.0));
        let scorer = scorer_with(fake);

        let jd = scorer.embed_job_description(JD).await.unwrap();
        let scores = scorer
            .score(&jd, &section_map(&[("Experience", "hostile")]), "t")
            .await
            .unwrap();

        assert!((scores.section_scores["Experience"] + 1.0).abs() < 1e-5);
        assert!(scores.combined_score < 0.0);
    }
}
