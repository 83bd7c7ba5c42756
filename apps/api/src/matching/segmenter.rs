//! Section Segmenter — partitions free-form resume text into canonical
//! sections by matching each line against the taxonomy keywords in
//! embedding space.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::embedding::{cosine_similarity, EmbedError, EmbeddingProvider};
use crate::matching::taxonomy::SectionTaxonomy;

/// Canonical section name → concatenated section content.
/// Fragments from repeated headings are joined with a blank line.
pub type SectionMap = BTreeMap<String, String>;

pub struct SectionSegmenter {
    embedder: Arc<dyn EmbeddingProvider>,
    taxonomy: SectionTaxonomy,
    /// Cosine-similarity cutoff for a line to count as a heading.
    threshold: f32,
}

impl SectionSegmenter {
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        taxonomy: SectionTaxonomy,
        threshold: f32,
    ) -> Self {
        Self {
            embedder,
            taxonomy,
            threshold,
        }
    }

    /// Segments resume text into a `SectionMap`.
    ///
    /// 1. Split into lines (none dropped — blank lines participate in
    ///    offset counting).
    /// 2. Embed all taxonomy keywords and all lines (one batched call each,
    ///    fast model).
    /// 3. A line is a heading iff its best keyword similarity exceeds the
    ///    threshold and it does not start with a bullet marker.
    /// 4. Each heading's content spans to the next heading (the last one to
    ///    end of document). Repeated headings append fragments rather than
    ///    overwrite.
    ///
    /// Zero detected headings yield an empty map, not an error.
    pub async fn segment(&self, resume_text: &str) -> Result<SectionMap, EmbedError> {
        let keywords = self.taxonomy.flattened_keywords();
        let keyword_texts: Vec<String> = keywords.iter().map(|k| k.keyword.clone()).collect();
        let lines: Vec<String> = resume_text.split('\n').map(str::to_string).collect();

        let keyword_embeddings = self.embedder.embed_many(&keyword_texts).await?;
        let line_embeddings = self.embedder.embed_many(&lines).await?;

        let mut headings: Vec<(usize, &'static str)> = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            let mut max_sim = f32::NEG_INFINITY;
            let mut max_idx = 0;
            for (j, keyword_embedding) in keyword_embeddings.iter().enumerate() {
                let sim = cosine_similarity(&line_embeddings[i], keyword_embedding);
                if sim > max_sim {
                    max_sim = sim;
                    max_idx = j;
                }
            }

            if max_sim > self.threshold && !starts_with_bullet(line) {
                headings.push((i, keywords[max_idx].canonical));
            }
        }

        let mut fragments: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();
        for (k, &(line_idx, canonical)) in headings.iter().enumerate() {
            let start = line_idx + 1;
            let end = headings
                .get(k + 1)
                .map(|(next_idx, _)| *next_idx)
                .unwrap_or(lines.len());
            let content = lines[start..end].join("\n").trim().to_string();
            fragments.entry(canonical).or_default().push(content);
        }

        Ok(fragments
            .into_iter()
            .map(|(canonical, parts)| (canonical.to_string(), parts.join("\n\n")))
            .collect())
    }
}

/// Bullet-point content that happens to resemble a keyword must not be
/// misread as a new heading.
fn starts_with_bullet(line: &str) -> bool {
    matches!(line.trim_start().chars().next(), Some('-') | Some('•'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::{unit, FakeEmbedder};
    use crate::matching::taxonomy::SectionTaxonomy;

    const THRESHOLD: f32 = 0.7;

    /// Fake embedder where the given lines match taxonomy keywords exactly
    /// (similarity 1.0) and everything else is near-orthogonal to them.
    fn embedder_matching(pairs: &[(&str, &str)]) -> Arc<FakeEmbedder> {
        // One reserved dimension per keyword; matched lines share their
        // keyword's vector, all other lines hash into orthogonal dimensions.
        let mut fake = FakeEmbedder::new();
        let taxonomy = SectionTaxonomy::default();
        for (dim_offset, kw) in taxonomy.flattened_keywords().iter().enumerate() {
            let v = unit(64 + dim_offset);
            fake = fake.with_fixed(&kw.keyword, v.clone());
            for (line, keyword) in pairs {
                if *keyword == kw.keyword {
                    fake = fake.with_fixed(line, v.clone());
                }
            }
        }
        Arc::new(fake)
    }

    fn segmenter(pairs: &[(&str, &str)]) -> SectionSegmenter {
        SectionSegmenter::new(
            embedder_matching(pairs),
            SectionTaxonomy::default(),
            THRESHOLD,
        )
    }

    #[tokio::test]
    async fn test_basic_two_section_split() {
        let seg = segmenter(&[("Experience", "experience"), ("Education", "education")]);
        let text = "Experience\nBuilt backend services at Acme\nEducation\nBS Computer Science";
        let sections = seg.segment(text).await.unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections["Experience"], "Built backend services at Acme");
        assert_eq!(sections["Education"], "BS Computer Science");
    }

    #[tokio::test]
    async fn test_no_headings_yields_empty_map() {
        let seg = segmenter(&[]);
        let sections = seg
            .segment("just some text\nwith no recognizable headings")
            .await
            .unwrap();
        assert!(sections.is_empty());
    }

    #[tokio::test]
    async fn test_bullet_line_is_not_a_heading() {
        // The bullet line embeds identically to "skills" but must be excluded.
        let seg = segmenter(&[
            ("Skills", "skills"),
            ("- Built X using Python", "skills"),
        ]);
        let text = "Skills\n- Built X using Python\nRust, Python";
        let sections = seg.segment(text).await.unwrap();

        assert_eq!(sections.len(), 1);
        assert_eq!(sections["Skills"], "- Built X using Python\nRust, Python");
    }

    #[tokio::test]
    async fn test_unicode_bullet_is_excluded_too() {
        let seg = segmenter(&[("Skills", "skills"), ("• Skills with Python", "skills")]);
        let text = "Skills\n• Skills with Python";
        let sections = seg.segment(text).await.unwrap();
        assert_eq!(sections["Skills"], "• Skills with Python");
    }

    #[tokio::test]
    async fn test_repeated_heading_appends_fragments() {
        let seg = segmenter(&[
            ("Experience", "experience"),
            ("Work Experience", "work experience"),
            ("Education", "education"),
        ]);
        let text = "Experience\nfirst stint\nEducation\nBS\nWork Experience\nsecond stint";
        let sections = seg.segment(text).await.unwrap();

        // Both blocks land under the canonical "Experience" name, joined
        // with a blank-line separator in order of appearance.
        assert_eq!(sections["Experience"], "first stint\n\nsecond stint");
        assert_eq!(sections["Education"], "BS");
    }

    #[tokio::test]
    async fn test_heading_on_last_line_yields_empty_section() {
        let seg = segmenter(&[("Certifications", "certifications")]);
        let text = "some preamble\nCertifications";
        let sections = seg.segment(text).await.unwrap();
        assert_eq!(sections["Certifications"], "");
    }

    #[tokio::test]
    async fn test_blank_lines_participate_in_offsets() {
        let seg = segmenter(&[("Experience", "experience"), ("Education", "education")]);
        let text = "Experience\n\nAcme Corp\n\nEducation\nBS";
        let sections = seg.segment(text).await.unwrap();
        // Leading/trailing blanks inside the span are trimmed away.
        assert_eq!(sections["Experience"], "Acme Corp");
    }

    #[tokio::test]
    async fn test_idempotent_on_extracted_section_content() {
        let seg = segmenter(&[("Experience", "experience")]);
        let text = "Experience\nShipped the billing system\nMentored two juniors";
        let first = seg.segment(text).await.unwrap();

        // Re-running on the extracted content finds no further headings.
        let second = seg.segment(&first["Experience"]).await.unwrap();
        assert!(second.is_empty());
    }
}
