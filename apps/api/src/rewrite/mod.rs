//! Rewrite / Revise — one parameterized pipeline for both operations.
//!
//! Flow: fetch resume → build prompt → single inference call (no retries) →
//!       recovery chain (structured → textual fallback → placeholder) →
//!       post-process → persist as the resume's current version.
//!
//! The two operations differ only in the JSON key the model is asked to fill
//! and in whether user feedback and the current version are merged into the
//! prompt, so they share every stage below.

pub mod handlers;
pub mod postprocess;
pub mod prompts;
pub mod recovery;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::inference::GenerationParameters;
use crate::resumes;
use crate::state::AppState;

/// Operation-mode tag. Selects the response key and the placeholder shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
    Rewrite,
    Revise,
}

impl RewriteMode {
    /// The single JSON key the model is instructed to respond with.
    pub fn response_key(self) -> &'static str {
        match self {
            RewriteMode::Rewrite => "rewritten_markdown",
            RewriteMode::Revise => "revised_markdown",
        }
    }

    fn noun(self) -> &'static str {
        match self {
            RewriteMode::Rewrite => "rewrite",
            RewriteMode::Revise => "revision",
        }
    }
}

/// A rewrite/revise request. Feedback is required for a revision and absent
/// for a rewrite — the only branching difference between the two call sites.
#[derive(Debug, Clone)]
pub enum RewriteOp {
    Rewrite,
    Revise {
        feedback: String,
        /// Explicit version to revise; defaults to the stored current version.
        current_version: Option<String>,
    },
}

impl RewriteOp {
    pub fn mode(&self) -> RewriteMode {
        match self {
            RewriteOp::Rewrite => RewriteMode::Rewrite,
            RewriteOp::Revise { .. } => RewriteMode::Revise,
        }
    }
}

/// How the final document was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryOutcome {
    AiSuccess,
    AiFallbackHeuristic,
    Placeholder,
}

/// Output of the recovery chain, before post-processing.
#[derive(Debug, Clone)]
pub struct RecoveredDocument {
    pub outcome: RecoveryOutcome,
    pub markdown: String,
}

/// Final pipeline result handed back to the HTTP layer.
#[derive(Debug, Clone, Serialize)]
pub struct ProducedDocument {
    pub outcome: RecoveryOutcome,
    pub content: String,
    pub message: String,
}

/// Runs the full pipeline for one rewrite/revise request and persists the
/// result as the resume's current version.
///
/// Inference problems never surface as errors here — they degrade through
/// the fallback chain to a placeholder document. The only hard failures are
/// input errors (missing resume, missing version to revise), source PDF
/// extraction failures, and a persistence failure after recovery.
pub async fn produce_document(
    state: &AppState,
    resume_id: Uuid,
    op: RewriteOp,
) -> Result<ProducedDocument, AppError> {
    let mode = op.mode();
    let resume = resumes::fetch_resume(&state.db, resume_id).await?;

    // Assemble the prompt and the inputs the placeholder may need later.
    let (prompt, prior_version, feedback) = match &op {
        RewriteOp::Rewrite => {
            let source_text = resumes::ensure_source_text(
                &state.db,
                &state.s3,
                &state.config.s3_bucket,
                &resume,
            )
            .await?;
            (prompts::build_rewrite_prompt(&source_text), None, None)
        }
        RewriteOp::Revise {
            feedback,
            current_version,
        } => {
            if feedback.trim().is_empty() {
                return Err(AppError::Validation("Feedback not provided".to_string()));
            }
            let prior = current_version
                .clone()
                .filter(|v| !v.trim().is_empty())
                .or_else(|| resume.rewritten_content.clone())
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| {
                    AppError::Validation(
                        "No current resume version available to revise".to_string(),
                    )
                })?;
            (
                prompts::build_revise_prompt(&prior, feedback),
                Some(prior),
                Some(feedback.clone()),
            )
        }
    };

    // Single attempt; a failed call falls straight through to the placeholder.
    let raw = match state
        .inference
        .generate(&prompt, GenerationParameters::document())
        .await
    {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Inference call for resume {resume_id} {} failed: {e}", mode.noun());
            None
        }
    };

    let recovered = recovery::resolve_document(
        mode,
        raw.as_deref(),
        prior_version.as_deref(),
        feedback.as_deref(),
    );
    let content = postprocess::normalize_markdown(&recovered.markdown);

    persist_current_version(state, resume_id, mode, &content).await?;

    info!(
        "Resume {} {} completed with outcome {:?} ({} chars)",
        resume_id,
        mode.noun(),
        recovered.outcome,
        content.len()
    );

    let message = match recovered.outcome {
        RecoveryOutcome::Placeholder => format!(
            "Resume {} failed to process AI response, using placeholder data.",
            mode.noun()
        ),
        _ => format!(
            "Resume {} processed successfully using AI response.",
            mode.noun()
        ),
    };

    Ok(ProducedDocument {
        outcome: recovered.outcome,
        content,
        message,
    })
}

/// Writes the recovered Markdown back as the resume's current version.
///
/// Last write wins: concurrent calls against the same resume are not
/// coordinated, which fits the single-user-editing-their-own-resume usage.
/// A failure here IS surfaced — the recovered content would otherwise be
/// silently lost.
async fn persist_current_version(
    state: &AppState,
    resume_id: Uuid,
    mode: RewriteMode,
    content: &str,
) -> Result<(), AppError> {
    match mode {
        RewriteMode::Rewrite => {
            sqlx::query(
                "UPDATE resumes SET rewritten_content = $1, updated_at = NOW() WHERE id = $2",
            )
            .bind(content)
            .bind(resume_id)
            .execute(&state.db)
            .await?;
        }
        RewriteMode::Revise => {
            sqlx::query(
                r#"
                UPDATE resumes
                SET rewritten_content = $1,
                    revision_count = revision_count + 1,
                    last_revision_date = NOW(),
                    updated_at = NOW()
                WHERE id = $2
                "#,
            )
            .bind(content)
            .bind(resume_id)
            .execute(&state.db)
            .await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selects_the_expected_response_key() {
        assert_eq!(RewriteMode::Rewrite.response_key(), "rewritten_markdown");
        assert_eq!(RewriteMode::Revise.response_key(), "revised_markdown");
    }

    #[test]
    fn test_op_maps_to_mode() {
        assert_eq!(RewriteOp::Rewrite.mode(), RewriteMode::Rewrite);
        let revise = RewriteOp::Revise {
            feedback: "tighten the summary".to_string(),
            current_version: None,
        };
        assert_eq!(revise.mode(), RewriteMode::Revise);
    }

    #[test]
    fn test_outcome_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&RecoveryOutcome::AiSuccess).unwrap(),
            "\"ai_success\""
        );
        assert_eq!(
            serde_json::to_string(&RecoveryOutcome::AiFallbackHeuristic).unwrap(),
            "\"ai_fallback_heuristic\""
        );
        assert_eq!(
            serde_json::to_string(&RecoveryOutcome::Placeholder).unwrap(),
            "\"placeholder\""
        );
    }
}
