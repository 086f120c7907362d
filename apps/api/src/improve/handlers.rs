//! Axum route handlers for the improvement API.

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::improve::tools::{
    build_prompts, catalog, Catalog, ImprovementTool, Targeting, UnknownTool,
};
use crate::llm_client::relay_lines;
use crate::state::AppState;
use crate::validation::validate_resume_text;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub job_role: String,
    #[serde(default)]
    pub experience_level: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub tool: String,
}

/// GET /api/v1/catalog
pub async fn handle_catalog() -> Json<Catalog> {
    Json(catalog())
}

/// POST /api/v1/resumes/improve
///
/// Gate-checks the resume, then streams the backend's SSE output back verbatim.
pub async fn handle_improve(
    State(state): State<AppState>,
    request: Result<Json<ImproveRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = request.map_err(|rejection| {
        warn!(%rejection, "Improvement request body rejected");
        AppError::Validation(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let verdict = validate_resume_text(&request.resume, &state.config.validation);
    if let Err(reason) = verdict.into_result() {
        info!(%reason, "Resume validation failed");
        return Err(AppError::ResumeRejected(reason));
    }

    let tool: ImprovementTool = request
        .tool
        .parse()
        .map_err(|UnknownTool(name)| {
            warn!(tool = %name, "Unknown improvement tool requested");
            AppError::Validation("Invalid tool specified".to_string())
        })?;

    info!(
        %tool,
        job_role = %request.job_role,
        experience_level = %request.experience_level,
        "Processing resume improvement"
    );

    let prompts = build_prompts(
        tool,
        Targeting {
            job_role: &request.job_role,
            industry: &request.industry,
            experience_level: &request.experience_level,
        },
        &request.resume,
    );

    let upstream = state.generator.stream_completion(&prompts).await?;
    info!(%tool, "Streaming response back to client");

    Ok((
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(relay_lines(upstream)),
    )
        .into_response())
}
