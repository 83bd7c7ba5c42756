//! Matching pipeline — the per-run driver that ties segmentation,
//! summarization and scoring together.
//!
//! Resumes are processed sequentially: the embedding provider and the
//! summarizer are rate-limited external services, and serializing keeps
//! error attribution per resume unambiguous. One resume failing is recorded
//! and skipped; the batch always continues.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::embedding::EmbedError;
use crate::errors::ProcessingError;
use crate::matching::scorer::{ScoreSet, SimilarityScorer};
use crate::matching::segmenter::SectionSegmenter;
use crate::matching::summarize::{summarize_sections, Summarizer};
use crate::models::resume::ResumeDocument;

/// A resume that failed processing and is absent from the ranked output.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedResume {
    pub filename: String,
    pub reason: String,
}

/// Everything a ranking run produced: successfully scored resumes in input
/// order, plus the resumes that were skipped.
#[derive(Debug)]
pub struct RunOutcome {
    pub scored: Vec<(String, ScoreSet)>,
    pub skipped: Vec<SkippedResume>,
}

pub struct MatchPipeline {
    segmenter: SectionSegmenter,
    scorer: SimilarityScorer,
    summarizer: Arc<dyn Summarizer>,
}

impl MatchPipeline {
    pub fn new(
        segmenter: SectionSegmenter,
        scorer: SimilarityScorer,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            segmenter,
            scorer,
            summarizer,
        }
    }

    /// Runs the full pipeline for one batch of resumes against one JD.
    ///
    /// The JD is embedded exactly once and the same vector is reused for
    /// every comparison in the run. Failure to embed the JD is fatal for the
    /// whole run (nothing can be scored without it); per-resume failures are
    /// not.
    pub async fn run(
        &self,
        jd_text: &str,
        resumes: &[ResumeDocument],
    ) -> Result<RunOutcome, EmbedError> {
        let jd_embedding = self.scorer.embed_job_description(jd_text).await?;

        let mut scored = Vec::with_capacity(resumes.len());
        let mut skipped = Vec::new();

        for resume in resumes {
            match self.process_one(&jd_embedding, resume).await {
                Ok(scores) => {
                    info!(
                        filename = %resume.filename,
                        combined_score = scores.combined_score,
                        "Scored resume"
                    );
                    scored.push((resume.filename.clone(), scores));
                }
                Err(e) => {
                    warn!(filename = %resume.filename, "Skipping resume: {e}");
                    skipped.push(SkippedResume {
                        filename: resume.filename.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(RunOutcome { scored, skipped })
    }

    async fn process_one(
        &self,
        jd_embedding: &[f32],
        resume: &ResumeDocument,
    ) -> Result<ScoreSet, ProcessingError> {
        let sections = self.segmenter.segment(&resume.text).await?;
        // Summarization failures fall back to raw text inside; never fatal.
        let summarized = summarize_sections(self.summarizer.as_ref(), &sections).await;
        let scores = self
            .scorer
            .score(jd_embedding, &summarized, &resume.text)
            .await?;
        Ok(scores)
    }
}
