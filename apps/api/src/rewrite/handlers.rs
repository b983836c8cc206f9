//! Axum route handlers for the rewrite and revise operations.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::rewrite::{produce_document, ProducedDocument, RewriteOp};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReviseRequest {
    pub feedback: String,
    /// Optional explicit version to revise; defaults to the stored one.
    pub current_version: Option<String>,
}

/// POST /api/v1/resumes/:id/rewrite
///
/// Always answers 200 with a document: inference failures degrade to a
/// placeholder outcome instead of an error.
pub async fn handle_rewrite(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ProducedDocument>, AppError> {
    let produced = produce_document(&state, resume_id, RewriteOp::Rewrite).await?;
    Ok(Json(produced))
}

/// POST /api/v1/resumes/:id/revise
pub async fn handle_revise(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<ReviseRequest>,
) -> Result<Json<ProducedDocument>, AppError> {
    if request.feedback.trim().is_empty() {
        return Err(AppError::Validation("Feedback not provided".to_string()));
    }

    let produced = produce_document(
        &state,
        resume_id,
        RewriteOp::Revise {
            feedback: request.feedback,
            current_version: request.current_version,
        },
    )
    .await?;
    Ok(Json(produced))
}
