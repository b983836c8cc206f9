//! Resume analysis — scores, insights, and improvement suggestions.
//!
//! Unlike rewrite/revise, analysis does NOT degrade to a placeholder: an
//! inference failure here is surfaced as a hard error, since there is no
//! meaningful static substitute for an analysis of a specific resume.

pub mod handlers;
pub mod prompts;

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::inference::{GenerationParameters, InferenceClient};
use crate::rewrite::recovery::slice_json_object;

/// Runs the analysis call and persists the result on the resume row.
///
/// The model is asked for bare JSON; responses wrapped in prose are reduced
/// to their outermost `{...}` slice. The slice is stored as-is — consumers
/// parse it client-side, so a malformed-but-present payload is still useful.
pub async fn analyze_resume(
    pool: &PgPool,
    inference: &InferenceClient,
    resume_id: Uuid,
    resume_text: &str,
) -> Result<String, AppError> {
    let prompt = prompts::build_analysis_prompt(resume_text);

    let raw = inference
        .generate(&prompt, GenerationParameters::document())
        .await
        .map_err(|e| AppError::Inference(format!("Resume analysis failed: {e}")))?;

    let analysis = slice_json_object(&raw).unwrap_or(&raw).to_string();

    sqlx::query("UPDATE resumes SET analysis = $1, updated_at = NOW() WHERE id = $2")
        .bind(&analysis)
        .bind(resume_id)
        .execute(pool)
        .await?;

    info!("Stored analysis for resume {resume_id} ({} chars)", analysis.len());
    Ok(analysis)
}
