//! Resume advice chat — question answering grounded in the resume text.

pub mod handlers;
pub mod prompts;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::inference::{GenerationParameters, InferenceClient};
use crate::models::chat::ChatMessageRow;

/// Extracts the reply from the raw generated text.
///
/// The chat call returns the full text (prompt included), so the reply is
/// whatever follows the last `AI:` marker. A marker-less response is taken
/// verbatim.
pub fn split_reply(raw: &str) -> &str {
    raw.rsplit(prompts::AI_TURN_MARKER)
        .next()
        .unwrap_or(raw)
        .trim()
}

/// Asks the advisor model a question about the resume and returns the reply.
/// Chat has no placeholder path: a failed call is a hard error.
pub async fn ask(
    inference: &InferenceClient,
    resume_text: &str,
    question: &str,
) -> Result<String, AppError> {
    let prompt = prompts::build_chat_prompt(resume_text, question);
    let raw = inference
        .generate(&prompt, GenerationParameters::chat())
        .await
        .map_err(|e| AppError::Inference(format!("Chat call failed: {e}")))?;
    Ok(split_reply(&raw).to_string())
}

/// Persists one message of the thread.
pub async fn store_message(
    pool: &PgPool,
    resume_id: Uuid,
    sender: &str,
    message: &str,
) -> Result<ChatMessageRow, AppError> {
    let row = sqlx::query_as::<_, ChatMessageRow>(
        r#"
        INSERT INTO chat_messages (id, resume_id, sender, message)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(resume_id)
    .bind(sender)
    .bind(message)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Loads a resume's thread in chronological order.
pub async fn list_messages(
    pool: &PgPool,
    resume_id: Uuid,
) -> Result<Vec<ChatMessageRow>, AppError> {
    let rows = sqlx::query_as::<_, ChatMessageRow>(
        "SELECT * FROM chat_messages WHERE resume_id = $1 ORDER BY created_at",
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_is_text_after_the_last_marker() {
        let raw = "CV Content: ...\nUser: How is my summary?\nAI: Your summary is strong.";
        assert_eq!(split_reply(raw), "Your summary is strong.");
    }

    #[test]
    fn test_reply_splits_on_last_marker_when_model_echoes_examples() {
        let raw = "User: a\nAI: first answer\nUser: b\nAI: second answer";
        assert_eq!(split_reply(raw), "second answer");
    }

    #[test]
    fn test_marker_less_response_is_taken_verbatim() {
        assert_eq!(split_reply("  plain reply  "), "plain reply");
    }

    #[test]
    fn test_empty_response_yields_empty_reply() {
        assert_eq!(split_reply(""), "");
    }
}
