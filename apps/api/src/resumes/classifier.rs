//! Resume classification — decides whether an uploaded document is a resume
//! at all before any storage or AI work happens.

use serde::Serialize;

use crate::inference::{InferenceClient, InferenceError, ZeroShotResponse};

/// Labels offered to the zero-shot classifier.
pub const CANDIDATE_LABELS: &[&str] = &[
    "resume",
    "curriculum vitae",
    "CV",
    "job application",
    "article",
    "report",
    "manual",
    "academic paper",
    "letter",
    "other",
];

/// Top labels accepted as "this is a resume". Academic papers are included
/// on purpose: academic CVs routinely classify as papers.
const RESUME_FAMILY: &[&str] = &["resume", "curriculum vitae", "CV", "job application", "academic paper"];

#[derive(Debug, Clone, Serialize)]
pub struct ResumeVerdict {
    pub is_resume: bool,
    pub confidence: f64,
    pub top_label: String,
}

/// Classifies extracted resume text via the zero-shot model.
pub async fn classify_resume(
    inference: &InferenceClient,
    text: &str,
) -> Result<ResumeVerdict, InferenceError> {
    let response = inference.classify(text, CANDIDATE_LABELS).await?;
    Ok(verdict_from(&response))
}

/// Pure verdict logic: the classifier returns labels sorted by descending
/// score, so the decision is whether the top label is in the resume family.
pub fn verdict_from(response: &ZeroShotResponse) -> ResumeVerdict {
    let top_label = response.labels[0].clone();
    let confidence = response.scores[0];
    let is_resume = RESUME_FAMILY.contains(&top_label.as_str());

    ResumeVerdict {
        is_resume,
        confidence,
        top_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(labels: &[&str], scores: &[f64]) -> ZeroShotResponse {
        serde_json::from_value(serde_json::json!({
            "labels": labels,
            "scores": scores,
        }))
        .unwrap()
    }

    #[test]
    fn test_top_resume_label_is_accepted() {
        let verdict = verdict_from(&response(&["resume", "article"], &[0.9, 0.1]));
        assert!(verdict.is_resume);
        assert_eq!(verdict.top_label, "resume");
        assert!((verdict.confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_cv_and_job_application_are_accepted() {
        assert!(verdict_from(&response(&["CV", "other"], &[0.7, 0.3])).is_resume);
        assert!(verdict_from(&response(&["job application", "letter"], &[0.6, 0.4])).is_resume);
    }

    #[test]
    fn test_academic_paper_counts_as_resume_family() {
        let verdict = verdict_from(&response(&["academic paper", "resume"], &[0.55, 0.45]));
        assert!(verdict.is_resume);
    }

    #[test]
    fn test_top_article_label_is_rejected() {
        let verdict = verdict_from(&response(&["article", "resume"], &[0.8, 0.2]));
        assert!(!verdict.is_resume);
        assert_eq!(verdict.top_label, "article");
    }

    #[test]
    fn test_candidate_labels_cover_resume_family() {
        for label in super::RESUME_FAMILY {
            assert!(CANDIDATE_LABELS.contains(label));
        }
    }
}
