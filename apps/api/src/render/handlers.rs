//! Axum route handler for PDF export.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::render::stylesheet::RESUME_STYLESHEET;
use crate::resumes;
use crate::rewrite::postprocess::normalize_markdown;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    /// Optional explicit Markdown to export; defaults to the resume's
    /// current version.
    pub content: Option<String>,
}

/// POST /api/v1/resumes/:id/export
///
/// Renders the resume's current Markdown version (or the provided content)
/// to PDF and streams it back as an attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let resume = resumes::fetch_resume(&state.db, resume_id).await?;

    let markdown = request
        .content
        .filter(|c| !c.trim().is_empty())
        .or(resume.rewritten_content)
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::Validation("No content provided".to_string()))?;

    // Renderers choke on stray fences and irregular bullets; run the same
    // normalization the pipeline applies before persistence.
    let markdown = normalize_markdown(&markdown);

    let pdf = state
        .renderer
        .render(&markdown, RESUME_STYLESHEET)
        .await
        .map_err(|e| AppError::Render(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"improved_resume.pdf\"",
            ),
        ],
        pdf,
    )
        .into_response())
}
