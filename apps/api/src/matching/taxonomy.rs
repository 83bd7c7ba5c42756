//! Section Taxonomy — the fixed vocabulary of canonical resume sections.
//!
//! Each canonical name owns a set of synonym keywords; every keyword maps to
//! exactly one canonical name and matching is case-insensitive. The taxonomy
//! is an immutable value handed to the segmenter at construction, never
//! module-level mutable state.

/// A canonical section with its synonym keywords.
#[derive(Debug, Clone)]
pub struct SectionGroup {
    pub canonical: &'static str,
    pub keywords: &'static [&'static str],
}

#[derive(Debug, Clone)]
pub struct SectionTaxonomy {
    groups: Vec<SectionGroup>,
}

/// A flattened keyword with a back-reference to its canonical section name.
#[derive(Debug, Clone)]
pub struct KeywordRef {
    pub keyword: String,
    pub canonical: &'static str,
}

impl Default for SectionTaxonomy {
    fn default() -> Self {
        Self {
            groups: vec![
                SectionGroup {
                    canonical: "Experience",
                    keywords: &[
                        "experience",
                        "work experience",
                        "employment history",
                        "internships",
                        "professional experience",
                    ],
                },
                SectionGroup {
                    canonical: "Education",
                    keywords: &[
                        "education",
                        "academic qualifications",
                        "degrees",
                        "coursework",
                    ],
                },
                SectionGroup {
                    canonical: "Projects",
                    keywords: &["projects", "academic projects", "personal projects"],
                },
                SectionGroup {
                    canonical: "Skills",
                    keywords: &[
                        "skills",
                        "technical skills",
                        "soft skills",
                        "programming languages",
                        "technologies",
                    ],
                },
                SectionGroup {
                    canonical: "Certifications",
                    keywords: &["certifications", "licenses", "accreditations"],
                },
                SectionGroup {
                    canonical: "Achievements",
                    keywords: &["awards", "achievements", "honors", "research publications"],
                },
            ],
        }
    }
}

impl SectionTaxonomy {
    /// Flattens all synonym keywords, lowercased, each carrying its
    /// canonical section name. Order is stable across calls.
    pub fn flattened_keywords(&self) -> Vec<KeywordRef> {
        self.groups
            .iter()
            .flat_map(|group| {
                group.keywords.iter().map(|kw| KeywordRef {
                    keyword: kw.to_lowercase(),
                    canonical: group.canonical,
                })
            })
            .collect()
    }

    pub fn canonical_names(&self) -> Vec<&'static str> {
        self.groups.iter().map(|g| g.canonical).collect()
    }
}
