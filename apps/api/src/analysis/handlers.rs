//! Axum route handler for resume analysis.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::analysis::analyze_resume;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resumes;
use crate::state::AppState;

/// POST /api/v1/resumes/:id/analyze
///
/// Returns the full resume row with the freshly stored analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = resumes::fetch_resume(&state.db, resume_id).await?;
    let text =
        resumes::ensure_source_text(&state.db, &state.s3, &state.config.s3_bucket, &resume).await?;

    analyze_resume(&state.db, &state.inference, resume_id, &text).await?;

    let refreshed = resumes::fetch_resume(&state.db, resume_id).await?;
    Ok(Json(refreshed))
}
