// Document text extraction: PDF and DOCX uploads become plain text, or fail with
// a reason the user can act on. Stateless; everything lives for one request.

pub mod docx;
pub mod handlers;
pub mod pdf;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Results shorter than this are extraction failures, not successes.
pub const MIN_EXTRACTED_CHARS: usize = 30;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type. Please upload a PDF, DOCX, or TXT file.")]
    UnsupportedFormat,

    #[error("Invalid DOCX file: {0}")]
    InvalidArchive(String),

    #[error("File is not a valid PDF")]
    NotAPdf,

    #[error("PDF text appears corrupted. Please copy and paste your resume text instead.")]
    CorruptedOutput,

    #[error("Could not extract enough text. Please copy and paste your resume text instead.")]
    TooShort { chars: usize },
}

/// Which extraction path a file takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Docx,
    /// Already plain text; decoded and passed through.
    Text,
}

impl DocumentKind {
    /// Picks the path from the file extension, falling back to the declared MIME type.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Option<Self> {
        let name = file_name.to_ascii_lowercase();
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if name.ends_with(".docx") || mime == DOCX_MIME {
            Some(Self::Docx)
        } else if name.ends_with(".pdf") || mime == "application/pdf" {
            Some(Self::Pdf)
        } else if name.ends_with(".txt") || mime == "text/plain" {
            Some(Self::Text)
        } else {
            None
        }
    }
}

/// Uploaded bytes plus the hints used to route them.
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub text: String,
    pub char_count: usize,
}

/// Routes a document to its extractor and applies the shared length floor.
pub fn extract_document(doc: &RawDocument) -> Result<ExtractionResult, ExtractionError> {
    let kind = DocumentKind::detect(&doc.file_name, doc.content_type.as_deref())
        .ok_or(ExtractionError::UnsupportedFormat)?;

    info!(
        file_name = %doc.file_name,
        ?kind,
        size_bytes = doc.bytes.len(),
        "Extracting document text"
    );

    let text = match kind {
        DocumentKind::Pdf => pdf::extract_text(&doc.bytes),
        DocumentKind::Docx => docx::extract_text(&doc.bytes),
        DocumentKind::Text => Ok(String::from_utf8_lossy(&doc.bytes).trim().to_string()),
    }
    .inspect_err(|e| warn!(?kind, "Extraction failed: {e}"))?;

    let char_count = text.chars().count();
    if char_count < MIN_EXTRACTED_CHARS {
        warn!(?kind, char_count, "Extracted text below length floor");
        return Err(ExtractionError::TooShort { chars: char_count });
    }

    info!(?kind, char_count, "Extraction succeeded");
    Ok(ExtractionResult { text, char_count })
}
