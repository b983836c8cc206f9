/// Inference Client — the single point of entry for all external model calls.
///
/// ARCHITECTURAL RULE: No other module may call the inference API directly.
/// All model interactions MUST go through this module.
///
/// The client wraps a hosted text-generation endpoint (`POST /models/<id>`
/// with an `{"inputs", "parameters"}` body) plus the zero-shot classification
/// model used for resume validation. Calls are bounded by a fixed timeout and
/// are NEVER retried: a failed generation call is reported to the caller,
/// which degrades to its fallback chain instead of erroring out.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// The instruct model used for analysis, rewrite, revision, and chat.
/// Intentionally hardcoded to prevent accidental drift between environments.
pub const GENERATION_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";
/// Zero-shot classification model used to decide whether an upload is a resume.
pub const CLASSIFICATION_MODEL: &str = "facebook/bart-large-mnli";

const REQUEST_TIMEOUT_SECS: u64 = 45;
/// Classification inputs are truncated to this many characters to stay under
/// the model's token limit.
const CLASSIFICATION_INPUT_LIMIT: usize = 1024;
/// Error bodies are truncated to this length in logs and error values.
const ERROR_BODY_LIMIT: usize = 500;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response envelope: {0}")]
    Envelope(String),
}

/// Sampling parameters sent alongside the prompt.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub return_full_text: bool,
    pub temperature: f32,
    pub do_sample: bool,
}

impl GenerationParameters {
    /// Parameters for full-document generation (analysis, rewrite, revision).
    /// `return_full_text: false` keeps the echo of the prompt out of the output.
    pub fn document() -> Self {
        Self {
            max_new_tokens: 2500,
            return_full_text: false,
            temperature: 0.7,
            do_sample: true,
        }
    }

    /// Parameters for short conversational replies. The full text (prompt
    /// included) is returned so the reply can be split off its `AI:` marker.
    pub fn chat() -> Self {
        Self {
            max_new_tokens: 500,
            return_full_text: true,
            temperature: 0.7,
            do_sample: true,
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: GenerationParameters,
}

#[derive(Debug, Deserialize)]
struct GeneratedChunk {
    generated_text: String,
}

/// The endpoint answers with either a list of generated chunks, a bare chunk
/// object, or an error payload — all with status 200 in some deployments.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationEnvelope {
    Batch(Vec<GeneratedChunk>),
    Single(GeneratedChunk),
    Failure { error: serde_json::Value },
}

fn generated_text(envelope: GenerationEnvelope) -> Result<String, InferenceError> {
    match envelope {
        GenerationEnvelope::Batch(mut chunks) => {
            if chunks.is_empty() {
                return Err(InferenceError::Envelope(
                    "empty generation batch".to_string(),
                ));
            }
            Ok(chunks.swap_remove(0).generated_text)
        }
        GenerationEnvelope::Single(chunk) => Ok(chunk.generated_text),
        GenerationEnvelope::Failure { error } => Err(InferenceError::Envelope(truncate(
            &error.to_string(),
            ERROR_BODY_LIMIT,
        ))),
    }
}

#[derive(Debug, Serialize)]
struct ClassificationRequest<'a> {
    inputs: &'a str,
    parameters: ClassificationParameters<'a>,
}

#[derive(Debug, Serialize)]
struct ClassificationParameters<'a> {
    candidate_labels: &'a [&'a str],
}

/// Zero-shot classification result: labels sorted by descending score.
#[derive(Debug, Clone, Deserialize)]
pub struct ZeroShotResponse {
    pub labels: Vec<String>,
    pub scores: Vec<f64>,
}

/// The single inference client shared by all services.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl InferenceClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
        }
    }

    /// Sends a prompt to the generation model and returns the raw generated
    /// text. A single attempt only — timeouts and transport errors surface as
    /// `Err` and it is the caller's job to decide how to degrade.
    pub async fn generate(
        &self,
        prompt: &str,
        parameters: GenerationParameters,
    ) -> Result<String, InferenceError> {
        let body = GenerationRequest {
            inputs: prompt,
            parameters,
        };

        let response = self
            .client
            .post(self.model_url(GENERATION_MODEL))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = truncate(&body, ERROR_BODY_LIMIT);
            warn!("Generation call failed with status {status}: {message}");
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: GenerationEnvelope = response.json().await?;
        let text = generated_text(envelope)?;
        debug!("Generation call succeeded ({} chars)", text.len());
        Ok(text)
    }

    /// Runs zero-shot classification of `text` against `candidate_labels`.
    /// The input is truncated to the model's comfortable context size.
    pub async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
    ) -> Result<ZeroShotResponse, InferenceError> {
        let truncated: String = text.chars().take(CLASSIFICATION_INPUT_LIMIT).collect();
        let body = ClassificationRequest {
            inputs: &truncated,
            parameters: ClassificationParameters { candidate_labels },
        };

        let response = self
            .client
            .post(self.model_url(CLASSIFICATION_MODEL))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = truncate(&body, ERROR_BODY_LIMIT);
            warn!("Classification call failed with status {status}: {message}");
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ZeroShotResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Envelope(format!("classification payload: {e}")))?;

        if parsed.labels.is_empty() || parsed.labels.len() != parsed.scores.len() {
            return Err(InferenceError::Envelope(
                "classification labels/scores mismatch".to_string(),
            ));
        }

        Ok(parsed)
    }

    fn model_url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url.trim_end_matches('/'), model)
    }
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let cut: String = text.chars().take(limit).collect();
        format!("{cut}...")
    }
}
