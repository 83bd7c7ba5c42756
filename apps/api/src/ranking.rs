//! Ranking & Decision Service — orders scored resumes, assigns dense ranks,
//! applies the hiring threshold, and aggregates summary statistics.

use serde::{Deserialize, Serialize};

use crate::matching::scorer::ScoreSet;

/// Informational tag only — it never alters scoring or ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Single,
    Multiple,
}

impl Default for AnalysisMode {
    fn default() -> Self {
        AnalysisMode::Multiple
    }
}

/// One resume's position in a ranking run. Create-once, read-only,
/// discarded after the response is produced.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub filename: String,
    /// Dense 1-based rank: strictly by sorted position, no skipping on ties.
    pub rank: usize,
    pub should_hire: bool,
    pub hire_status: &'static str,
    /// Combined, average, full-text and per-section scores, carried through
    /// unchanged for display and audit.
    #[serde(flatten)]
    pub scores: ScoreSet,
    pub mode: AnalysisMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct HiringSummary {
    pub total_candidates: usize,
    pub hired_candidates: usize,
    pub not_hired_candidates: usize,
    pub hire_percentage: f32,
}

/// Ranks scored resumes by combined score, descending.
///
/// The sort is stable: equal combined scores keep their relative input
/// order. The decision is inclusive at the boundary
/// (`combined_score >= threshold`, threshold already scaled to 0–1).
/// An empty input yields an empty ranking, not an error.
pub fn rank_candidates(
    results: Vec<(String, ScoreSet)>,
    threshold: f32,
    mode: AnalysisMode,
) -> Vec<RankedCandidate> {
    let mut sorted = results;
    sorted.sort_by(|a, b| {
        b.1.combined_score
            .partial_cmp(&a.1.combined_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, (filename, scores))| {
            let should_hire = scores.combined_score >= threshold;
            RankedCandidate {
                filename,
                rank: i + 1,
                should_hire,
                hire_status: if should_hire { "HIRE" } else { "NOT HIRE" },
                scores,
                mode,
            }
        })
        .collect()
}

/// Recomputed each run; zero-filled for an empty ranking.
pub fn hiring_summary(candidates: &[RankedCandidate]) -> HiringSummary {
    let total_candidates = candidates.len();
    let hired_candidates = candidates.iter().filter(|c| c.should_hire).count();
    let hire_percentage = if total_candidates > 0 {
        hired_candidates as f32 / total_candidates as f32 * 100.0
    } else {
        0.0
    };

    HiringSummary {
        total_candidates,
        hired_candidates,
        not_hired_candidates: total_candidates - hired_candidates,
        hire_percentage,
    }
}
