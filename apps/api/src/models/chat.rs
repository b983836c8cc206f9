use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One message in a resume's advice thread. `sender` is "user" or "ai".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessageRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub sender: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
