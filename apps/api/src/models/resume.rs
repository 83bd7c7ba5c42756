use serde::{Deserialize, Serialize};

/// A resume as handed to the matching pipeline: a filename plus the raw
/// extracted text. Immutable once produced by the upstream extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub filename: String,
    pub text: String,
}

impl ResumeDocument {
    pub fn new(filename: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
        }
    }
}
