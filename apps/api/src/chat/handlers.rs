//! Axum route handlers for the resume advice thread.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat;
use crate::errors::AppError;
use crate::models::chat::ChatMessageRow;
use crate::resumes;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// GET /api/v1/resumes/:id/chat
pub async fn handle_list_messages(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Vec<ChatMessageRow>>, AppError> {
    // 404 for unknown resumes rather than an empty thread.
    resumes::fetch_resume(&state.db, resume_id).await?;
    let messages = chat::list_messages(&state.db, resume_id).await?;
    Ok(Json(messages))
}

/// POST /api/v1/resumes/:id/chat
///
/// Stores the user's question, asks the advisor model, stores and returns
/// the reply.
pub async fn handle_send_message(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    if request.message.trim().is_empty() {
        return Err(AppError::Validation("Missing message".to_string()));
    }

    let resume = resumes::fetch_resume(&state.db, resume_id).await?;
    let text =
        resumes::ensure_source_text(&state.db, &state.s3, &state.config.s3_bucket, &resume).await?;

    chat::store_message(&state.db, resume_id, "user", &request.message).await?;
    let reply = chat::ask(&state.inference, &text, &request.message).await?;
    chat::store_message(&state.db, resume_id, "ai", &reply).await?;

    Ok(Json(ChatResponse { reply }))
}
