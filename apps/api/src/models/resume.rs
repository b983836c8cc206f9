use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored resume: the uploaded PDF lives in S3 under `s3_file_key`;
/// `text` is filled lazily on first use, `rewritten_content` holds the
/// current AI-produced Markdown version.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub s3_file_key: String,
    pub text: Option<String>,
    pub analysis: Option<String>,
    pub rewritten_content: Option<String>,
    pub revision_count: i32,
    pub last_revision_date: Option<DateTime<Utc>>,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
