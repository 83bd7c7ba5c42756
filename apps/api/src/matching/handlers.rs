//! Axum route handlers for the Ranking API.

use axum::extract::{Multipart, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::extract_pdf_text;
use crate::matching::pipeline::{MatchPipeline, SkippedResume};
use crate::matching::scorer::SimilarityScorer;
use crate::matching::segmenter::SectionSegmenter;
use crate::matching::taxonomy::SectionTaxonomy;
use crate::models::resume::ResumeDocument;
use crate::ranking::{hiring_summary, rank_candidates, AnalysisMode, HiringSummary, RankedCandidate};
use crate::state::AppState;

const DEFAULT_THRESHOLD_PERCENT: f32 = 70.0;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// JSON variant for callers that do their own text extraction.
#[derive(Debug, Deserialize)]
pub struct RankTextRequest {
    pub job_description: String,
    /// Percentage 0–100; scaled to 0–1 before comparison. Defaults to 70.
    pub threshold: Option<f32>,
    #[serde(default)]
    pub analysis_mode: AnalysisMode,
    pub resumes: Vec<ResumeDocument>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub run_id: Uuid,
    pub processed_at: DateTime<Utc>,
    pub mode: AnalysisMode,
    /// The threshold actually applied, scaled to 0–1.
    pub threshold: f32,
    pub ranked_resumes: Vec<RankedCandidate>,
    pub hiring_summary: HiringSummary,
    pub total_resumes: usize,
    pub skipped: Vec<SkippedResume>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rank
///
/// Multipart form: `job_desc` (required), `threshold` (0–100, default 70),
/// `analysis_mode` (`single` | `multiple`, default `multiple`), and repeated
/// `resumes` PDF file parts. PDFs that fail extraction are reported in
/// `skipped`, never abort the batch.
pub async fn handle_rank(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RankResponse>, AppError> {
    let mut job_desc = String::new();
    let mut threshold_percent = DEFAULT_THRESHOLD_PERCENT;
    let mut mode = AnalysisMode::default();
    let mut files: Vec<(String, bytes::Bytes)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart request: {e}")))?
    {
        match field.name().unwrap_or_default() {
            "job_desc" => {
                job_desc = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid job_desc field: {e}")))?
                    .trim()
                    .to_string();
            }
            "threshold" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid threshold field: {e}")))?;
                threshold_percent = raw.trim().parse::<f32>().map_err(|_| {
                    AppError::Validation(
                        "Please enter a valid threshold percentage (0-100)".to_string(),
                    )
                })?;
            }
            "analysis_mode" => {
                let raw = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Invalid analysis_mode field: {e}"))
                })?;
                mode = parse_mode(raw.trim())?;
            }
            "resumes" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("resume-{}.pdf", files.len() + 1));
                let data = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read uploaded file: {e}"))
                })?;
                files.push((filename, data));
            }
            _ => {}
        }
    }

    let threshold = validate_threshold(threshold_percent)?;

    if job_desc.is_empty() {
        return Err(AppError::Validation(
            "Job description is required".to_string(),
        ));
    }
    if files.is_empty() {
        return Err(AppError::Validation(
            "At least one resume file is required".to_string(),
        ));
    }
    if mode == AnalysisMode::Single && files.len() > 1 {
        return Err(AppError::Validation(
            "Please upload only one resume file for single resume analysis".to_string(),
        ));
    }

    // Extraction failures are per-resume: record and continue.
    let mut resumes = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();
    for (filename, data) in &files {
        match extract_pdf_text(data) {
            Ok(text) => resumes.push(ResumeDocument::new(filename.clone(), text)),
            Err(e) => {
                tracing::warn!(filename = %filename, "Skipping resume: {e}");
                skipped.push(SkippedResume {
                    filename: filename.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let mut response = run_ranking(&state, &job_desc, &resumes, threshold, mode).await?;
    // Prepend extraction casualties so the skipped list covers the whole batch.
    skipped.extend(response.skipped);
    response.skipped = skipped;

    if response.ranked_resumes.is_empty() && !response.skipped.is_empty() {
        return Err(AppError::UnprocessableEntity(
            "No resumes could be processed".to_string(),
        ));
    }

    Ok(Json(response))
}

/// POST /api/v1/rank/text
///
/// Same pipeline for pre-extracted resume text. An empty resume list is
/// valid and yields an empty ranking with a zero-filled summary.
pub async fn handle_rank_text(
    State(state): State<AppState>,
    Json(request): Json<RankTextRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let job_desc = request.job_description.trim().to_string();
    if job_desc.is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let threshold =
        validate_threshold(request.threshold.unwrap_or(DEFAULT_THRESHOLD_PERCENT))?;

    if request.analysis_mode == AnalysisMode::Single && request.resumes.len() > 1 {
        return Err(AppError::Validation(
            "Please provide only one resume for single resume analysis".to_string(),
        ));
    }

    let response = run_ranking(
        &state,
        &job_desc,
        &request.resumes,
        threshold,
        request.analysis_mode,
    )
    .await?;

    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared plumbing
// ────────────────────────────────────────────────────────────────────────────

async fn run_ranking(
    state: &AppState,
    job_desc: &str,
    resumes: &[ResumeDocument],
    threshold: f32,
    mode: AnalysisMode,
) -> Result<RankResponse, AppError> {
    let run_id = Uuid::new_v4();
    info!(%run_id, resumes = resumes.len(), ?mode, threshold, "Starting ranking run");

    let pipeline = MatchPipeline::new(
        SectionSegmenter::new(
            state.fast_embedder.clone(),
            SectionTaxonomy::default(),
            state.config.section_similarity_threshold,
        ),
        SimilarityScorer::new(state.scoring_embedder.clone()),
        state.summarizer.clone(),
    );

    let outcome = pipeline.run(job_desc, resumes).await?;
    let ranked_resumes = rank_candidates(outcome.scored, threshold, mode);
    let summary = hiring_summary(&ranked_resumes);

    info!(
        %run_id,
        ranked = ranked_resumes.len(),
        skipped = outcome.skipped.len(),
        hired = summary.hired_candidates,
        "Ranking run complete"
    );

    Ok(RankResponse {
        run_id,
        processed_at: Utc::now(),
        mode,
        threshold,
        total_resumes: ranked_resumes.len(),
        ranked_resumes,
        hiring_summary: summary,
        skipped: outcome.skipped,
    })
}

/// Accepts a percentage in [0, 100] and scales it to the 0–1 range the
/// decision comparison uses.
fn validate_threshold(percent: f32) -> Result<f32, AppError> {
    if !(0.0..=100.0).contains(&percent) || percent.is_nan() {
        return Err(AppError::Validation(
            "Please enter a valid threshold percentage (0-100)".to_string(),
        ));
    }
    Ok(percent / 100.0)
}

fn parse_mode(raw: &str) -> Result<AnalysisMode, AppError> {
    match raw {
        "single" => Ok(AnalysisMode::Single),
        "multiple" | "" => Ok(AnalysisMode::Multiple),
        other => Err(AppError::Validation(format!(
            "Unknown analysis_mode '{other}' (expected 'single' or 'multiple')"
        ))),
    }
}
