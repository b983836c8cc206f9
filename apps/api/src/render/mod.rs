//! Markdown → PDF rendering, delegated to an external renderer service.
//!
//! Rendering internals (layout, pagination, fonts) are a black box behind
//! `DocumentRenderer`: the service receives Markdown plus the fixed resume
//! stylesheet and answers with PDF bytes, or with a JSON error carrying its
//! diagnostic log.

pub mod handlers;
pub mod stylesheet;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const RENDER_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("renderer error (status {status}): {message}")]
    Failed {
        status: u16,
        message: String,
        /// Diagnostic log returned by the renderer, when present.
        log: Option<String>,
    },
}

/// Pluggable renderer seam. The production implementation is `HttpRenderer`;
/// tests substitute a stub.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, markdown: &str, stylesheet: &str) -> Result<Vec<u8>, RenderError>;
}

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    markdown: &'a str,
    stylesheet: &'a str,
}

#[derive(Debug, Deserialize)]
struct RendererFailure {
    error: String,
    log: Option<String>,
}

/// HTTP client for the renderer service.
#[derive(Clone)]
pub struct HttpRenderer {
    client: Client,
    url: String,
}

impl HttpRenderer {
    pub fn new(url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(RENDER_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            url,
        }
    }
}

#[async_trait]
impl DocumentRenderer for HttpRenderer {
    async fn render(&self, markdown: &str, stylesheet: &str) -> Result<Vec<u8>, RenderError> {
        let response = self
            .client
            .post(&self.url)
            .json(&RenderRequest {
                markdown,
                stylesheet,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (message, log) = match serde_json::from_str::<RendererFailure>(&body) {
                Ok(failure) => (failure.error, failure.log),
                Err(_) => (body, None),
            };
            return Err(RenderError::Failed {
                status: status.as_u16(),
                message,
                log,
            });
        }

        let bytes = response.bytes().await?;
        debug!("Renderer produced {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_request_serializes_both_fields() {
        let request = RenderRequest {
            markdown: "# Jane Doe",
            stylesheet: "body { font-size: 10pt; }",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["markdown"], "# Jane Doe");
        assert_eq!(json["stylesheet"], "body { font-size: 10pt; }");
    }

    #[test]
    fn test_renderer_failure_parses_diagnostic_log() {
        let body = r#"{"error": "layout failed", "log": "line 3: unknown directive"}"#;
        let failure: RendererFailure = serde_json::from_str(body).unwrap();
        assert_eq!(failure.error, "layout failed");
        assert_eq!(failure.log.as_deref(), Some("line 3: unknown directive"));
    }

    #[test]
    fn test_renderer_failure_log_is_optional() {
        let failure: RendererFailure =
            serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert!(failure.log.is_none());
    }
}
