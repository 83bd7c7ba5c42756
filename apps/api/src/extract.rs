//! PDF text extraction for uploaded resumes.

use crate::errors::ProcessingError;

/// Extracts plain text from an in-memory PDF. Extraction failures are
/// per-resume: the caller records them and moves on to the next file.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ProcessingError> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ProcessingError::Extraction(e.to_string()))?;
    Ok(text.trim().to_string())
}
