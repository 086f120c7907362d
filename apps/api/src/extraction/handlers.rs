//! Axum route handler for document uploads.

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{extract_document, RawDocument};
use crate::state::AppState;
use crate::validation::validate_resume_text;

const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDocumentResponse {
    pub success: bool,
    pub text: String,
    pub char_count: usize,
}

/// POST /api/v1/documents/parse
///
/// Accepts a multipart `file` field (PDF, DOCX or TXT) and returns its plain text.
/// The text is gate-checked before it goes back to the client.
#[tracing::instrument(skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn handle_parse_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ParseDocumentResponse>, AppError> {
    let mut multipart = multipart.map_err(|rejection| {
        warn!(%rejection, "Upload is not a multipart form");
        AppError::UploadRejected(format!("Malformed upload: {}", rejection.body_text()))
    })?;

    let document = read_file_field(&mut multipart, state.config.max_upload_bytes)
        .await?
        .ok_or_else(|| AppError::UploadRejected("No file provided".to_string()))?;

    info!(
        file_name = %document.file_name,
        content_type = ?document.content_type,
        size_bytes = document.bytes.len(),
        "Received document parse request"
    );

    // Extraction is regex-heavy and CPU-bound.
    let result = tokio::task::spawn_blocking(move || extract_document(&document))
        .await
        .map_err(|e| AppError::UploadFailed(format!("extraction task failed: {e}")))??;

    let verdict = validate_resume_text(&result.text, &state.config.validation);
    if let Err(reason) = verdict.into_result() {
        warn!(%reason, char_count = result.char_count, "Extracted text rejected");
        return Err(AppError::UploadRejected(format!(
            "{reason}. Please try a different file or paste your resume text manually."
        )));
    }

    Ok(Json(ParseDocumentResponse {
        success: true,
        text: result.text,
        char_count: result.char_count,
    }))
}

/// Buffers the first `file` field; other fields are skipped.
async fn read_file_field(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<Option<RawDocument>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Malformed upload", max_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Could not read uploaded file", max_bytes))?;

        return Ok(Some(RawDocument {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

/// The body limit surfaces as a multipart read error; report it as such.
fn multipart_error(error: MultipartError, context: &str, max_bytes: usize) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        warn!(max_bytes, "Upload exceeds body limit");
        return AppError::UploadTooLarge(format!(
            "File is too large. Maximum upload size is {max_bytes} bytes."
        ));
    }
    AppError::UploadRejected(format!("{context}: {}", error.body_text()))
}
