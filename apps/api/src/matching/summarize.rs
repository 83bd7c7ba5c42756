//! Section Summarizer — condenses each section's raw text before scoring.
//!
//! Scoring must never fail because summarization failed: callers fall back
//! to the raw section text on any error.

use async_trait::async_trait;

use crate::llm_client::{LlmClient, LlmError};
use crate::matching::segmenter::SectionMap;

const SYSTEM_PROMPT: &str = "You are an AI that summarizes Resume section content.";

/// Placeholder scored in place of a section that was detected but has no
/// content (e.g. a heading on the document's last line).
pub const EMPTY_SECTION_PLACEHOLDER: &str = "No content available.";

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, section_name: &str, text: &str) -> Result<String, LlmError>;
}

/// Claude-backed summarizer.
pub struct LlmSummarizer {
    llm: LlmClient,
}

impl LlmSummarizer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, section_name: &str, text: &str) -> Result<String, LlmError> {
        let prompt = format!("Summarize the following section:\n\n{section_name}: {text}");
        let response = self.llm.call(&prompt, SYSTEM_PROMPT).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

/// Summarizes every section in the map. A failed summarization falls back to
/// the original text unchanged; empty sections get the fixed placeholder.
pub async fn summarize_sections(
    summarizer: &dyn Summarizer,
    sections: &SectionMap,
) -> SectionMap {
    let mut summarized = SectionMap::new();
    for (name, text) in sections {
        if text.trim().is_empty() {
            summarized.insert(name.clone(), EMPTY_SECTION_PLACEHOLDER.to_string());
            continue;
        }
        let content = match summarizer.summarize(name, text).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!("Summarization failed for section '{name}', using raw text: {e}");
                text.clone()
            }
        };
        summarized.insert(name.clone(), content);
    }
    summarized
}


#[cfg(test)]
mod tests {
    use super::testing::{CannedSummarizer, FailingSummarizer};
    use super::*;

    fn section_map(entries: &[(&str, &str)]) -> SectionMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_sections_are_summarized() {
        let sections = section_map(&[("Experience", "ten years of Rust")]);
        let out = summarize_sections(&CannedSummarizer, &sections).await;
        assert_eq!(out["Experience"], "summary: ten years of Rust");
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_raw_text() {
        let sections = section_map(&[("Skills", "Rust, Python")]);
        let out = summarize_sections(&FailingSummarizer, &sections).await;
        assert_eq!(out["Skills"], "Rust, Python");
    }

    #[tokio::test]
    async fn test_empty_section_gets_placeholder() {
        let sections = section_map(&[("Certifications", "")]);
        let out = summarize_sections(&CannedSummarizer, &sections).await;
        assert_eq!(out["Certifications"], EMPTY_SECTION_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_empty_map_stays_empty() {
        let out = summarize_sections(&CannedSummarizer, &SectionMap::new()).await;
        assert!(out.is_empty());
    }
}
