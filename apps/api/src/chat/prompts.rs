//! Prompt for the resume advice chat.

/// The reply is everything after the final occurrence of this marker in the
/// returned text (the model continues the prompt, which ends with it).
pub const AI_TURN_MARKER: &str = "AI:";

const CHAT_PROMPT_TEMPLATE: &str = r#"You are an expert ATS resume advisor. Your answer must reference specific details from the CV provided below. Do not provide generic advice. Instead, analyze the CV content (including skills, education, experience, achievements, etc.) and tailor your answer based on that information. If the CV lacks sufficient details, mention it explicitly. Do not exceed 100 words.

CV Content:
{resume_text}

Based on the CV above, please answer the following question, referencing specific details from the CV:
User: {question}
AI:"#;

pub fn build_chat_prompt(resume_text: &str, question: &str) -> String {
    CHAT_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text)
        .replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_cv_and_question() {
        let prompt = build_chat_prompt("JANE DOE\nRust Engineer", "What should I improve?");
        assert!(prompt.contains("JANE DOE\nRust Engineer"));
        assert!(prompt.contains("User: What should I improve?"));
    }

    #[test]
    fn test_prompt_ends_with_the_ai_turn_marker() {
        let prompt = build_chat_prompt("cv", "q");
        assert!(prompt.trim_end().ends_with(AI_TURN_MARKER));
    }
}
