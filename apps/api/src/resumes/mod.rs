pub mod classifier;
pub mod handlers;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::{pdf_text, storage};

/// Loads a resume row or fails with 404.
pub async fn fetch_resume(pool: &PgPool, resume_id: Uuid) -> Result<ResumeRow, AppError> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

/// Returns the resume's extracted text, extracting it from the stored PDF
/// and caching it on the row if no extraction has happened yet.
///
/// Extraction failure is terminal for the enclosing request.
pub async fn ensure_source_text(
    pool: &PgPool,
    s3: &S3Client,
    bucket: &str,
    resume: &ResumeRow,
) -> Result<String, AppError> {
    if let Some(text) = &resume.text {
        if !text.trim().is_empty() {
            return Ok(text.clone());
        }
    }

    let data = storage::download_pdf(s3, bucket, &resume.s3_file_key).await?;
    let text = pdf_text::extract_text(&data)?;

    sqlx::query("UPDATE resumes SET text = $1, updated_at = NOW() WHERE id = $2")
        .bind(&text)
        .bind(resume.id)
        .execute(pool)
        .await?;

    info!("Extracted and cached text for resume {}", resume.id);
    Ok(text)
}
