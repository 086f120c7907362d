use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;
use crate::validation::Rejection;

/// Shown for every rejected improvement request, whatever the specific reason.
pub const INVALID_RESUME_MESSAGE: &str = "Resume text could not be extracted correctly from the uploaded PDF.\n\nPlease upload a different PDF, a DOCX file, or paste the resume text manually.";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Upload failures use the `{success: false, error}` envelope the upload client
/// expects; everything else answers with `{error}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    #[error("Upload too large: {0}")]
    UploadTooLarge(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Resume rejected: {0}")]
    ResumeRejected(Rejection),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::UploadRejected(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": msg }),
            ),
            AppError::UploadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                json!({ "success": false, "error": msg }),
            ),
            AppError::Extraction(e) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "error": e.to_string() }),
            ),
            AppError::UploadFailed(msg) => {
                tracing::error!("Upload failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "error": "Failed to parse document" }),
                )
            }
            AppError::ResumeRejected(_) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": INVALID_RESUME_MESSAGE, "validationError": true }),
            ),
            AppError::Llm(LlmError::RateLimited) => (
                StatusCode::TOO_MANY_REQUESTS,
                json!({ "error": "Rate limit exceeded. Please try again in a moment." }),
            ),
            AppError::Llm(LlmError::QuotaExhausted) => (
                StatusCode::PAYMENT_REQUIRED,
                json!({ "error": "AI credits exhausted. Please add funds to continue." }),
            ),
            AppError::Llm(LlmError::NotConfigured) => {
                tracing::error!("AI gateway API key is not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "AI service is not configured" }),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                let message = match e {
                    LlmError::Api { status, .. } => format!("AI service error: {status}"),
                    _ => "AI service error".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
        };

        (status, Json(body)).into_response()
    }
}
