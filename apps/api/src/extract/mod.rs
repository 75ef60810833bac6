//! Résumé text extraction.
//!
//! Thin wrapper over `pdf-extract`: document bytes in, plain text out. Pages
//! without an extractable text layer contribute nothing; only a structurally
//! unreadable document is an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not read document: {0}")]
    Unreadable(String),
}

/// Extracts the plain text of an uploaded résumé PDF.
///
/// The returned string may be empty when the document has no text layer;
/// callers treat that as a "no input" condition, not an error.
pub fn extract_resume_text(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ExtractError::Unreadable(e.to_string()))
}
