use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::inference::InferenceClient;
use crate::render::DocumentRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub inference: InferenceClient,
    /// Pluggable Markdown-to-PDF renderer. Default: HttpRenderer against RENDERER_URL.
    pub renderer: Arc<dyn DocumentRenderer>,
    pub config: Config,
}
