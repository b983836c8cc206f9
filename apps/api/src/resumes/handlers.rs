//! Axum route handlers for resume upload, validation, and retrieval.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::pdf_text;
use crate::resumes::classifier::{classify_resume, ResumeVerdict};
use crate::state::AppState;
use crate::storage;

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub is_resume: bool,
    pub confidence: f64,
    pub top_label: String,
}

struct UploadedFile {
    file_name: String,
    data: Bytes,
}

/// Pulls the `file` field out of a multipart body.
async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
        return Ok(UploadedFile { file_name, data });
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}

fn require_pdf_name(file_name: &str) -> Result<(), AppError> {
    if file_name.to_lowercase().ends_with(".pdf") {
        Ok(())
    } else {
        Err(AppError::Validation("File must be a PDF".to_string()))
    }
}

async fn extract_and_classify(
    state: &AppState,
    file: &UploadedFile,
) -> Result<(String, ResumeVerdict), AppError> {
    let text = pdf_text::extract_text(&file.data)?;
    let verdict = classify_resume(&state.inference, &text)
        .await
        .map_err(|e| AppError::Inference(format!("Resume classification failed: {e}")))?;
    Ok((text, verdict))
}

/// POST /api/v1/resumes/validate
///
/// Checks whether an uploaded PDF looks like a resume without storing anything.
pub async fn handle_validate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ValidateResponse>, AppError> {
    let file = read_file_field(multipart).await?;
    require_pdf_name(&file.file_name)?;

    let (_text, verdict) = extract_and_classify(&state, &file).await?;

    Ok(Json(ValidateResponse {
        is_resume: verdict.is_resume,
        confidence: verdict.confidence,
        top_label: verdict.top_label,
    }))
}

/// POST /api/v1/resumes
///
/// Validates the upload, stores the PDF in object storage, persists the
/// extracted text, and returns the new resume row.
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeRow>, AppError> {
    let file = read_file_field(multipart).await?;
    require_pdf_name(&file.file_name)?;

    let (text, verdict) = extract_and_classify(&state, &file).await?;
    if !verdict.is_resume {
        return Err(AppError::Validation(format!(
            "The uploaded file doesn't appear to be a resume (classified as '{}' with confidence {:.2})",
            verdict.top_label, verdict.confidence
        )));
    }

    let resume_id = Uuid::new_v4();
    let s3_file_key = format!("resumes/{resume_id}.pdf");
    storage::upload_pdf(&state.s3, &state.config.s3_bucket, &s3_file_key, file.data).await?;

    let resume = sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, s3_file_key, text)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(resume_id)
    .bind(&s3_file_key)
    .bind(&text)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(resume))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = crate::resumes::fetch_resume(&state.db, resume_id).await?;
    Ok(Json(resume))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extension_check_is_case_insensitive() {
        assert!(require_pdf_name("resume.pdf").is_ok());
        assert!(require_pdf_name("Resume.PDF").is_ok());
    }

    #[test]
    fn test_non_pdf_names_are_rejected() {
        assert!(require_pdf_name("resume.docx").is_err());
        assert!(require_pdf_name("resume").is_err());
        assert!(require_pdf_name("").is_err());
    }
}
