//! Prompt templates for the rewrite and revision calls.
//!
//! Both prompts demand a single JSON object as the entire response. The final
//! instruction line is also used as the split marker by the textual fallback
//! extractor, so it must stay byte-identical between the two.

/// Final instruction line of both prompts. The fallback extractor slices the
/// raw response after the LAST occurrence of this marker, so models that echo
/// the prompt before answering still recover.
pub const RESPONSE_MARKER: &str = "**Your Response (JSON Object Only):**";

/// The fixed section template both prompts instruct the model to follow.
const MARKDOWN_TEMPLATE: &str = r#"# [Full Name]
[City, State (if available)] | [Phone Number (if available)] | [Email Address] | [LinkedIn Profile URL (if available, otherwise omit)]

## Summary
[Summary text...]

## Skills
*   **Programming Languages:** [Comma-separated list]
*   **Frameworks & Libraries:** [Comma-separated list]
*   [...]

## Experience
### [Job Title]
**[Company Name]** | [City, State] | [Start Month, Year] – [End Month, Year or Present]
*   [Responsibility/achievement 1...]
*   [Responsibility/achievement 2...]

### [Previous Job Title]
**[Previous Company Name]** | [...]
*   [...]

## Education
### [Degree Name]
**[Institution Name]** | [...]
*   [Optional bullet...]

## Projects (Include ONLY if distinct)
### [Project Name 1]
*   [Description...]

## Certifications (Include ONLY if mentioned)
*   [Certification Name...]"#;

const REWRITE_PROMPT_TEMPLATE: &str = r#"You are an expert ATS resume writer and formatter. Your task is to rewrite the provided raw resume text to be highly impactful, professional, ATS-optimized, and structured precisely in Markdown format.

**Core Instructions:**
1.  **Maintain Information:** Preserve ALL original information (names, dates, companies, skills, descriptions, locations, contact details etc.). Do not invent or omit details present in the original.
2.  **Enhance Wording:** Improve clarity, use strong action verbs, quantify achievements, and ensure professional language.
3.  **ATS Optimization:** Naturally integrate relevant keywords.
4.  **Markdown Structure:** Format the rewritten resume using the standard Markdown structure provided below (Headers, bullets, bolding). Use '*' for ALL bullet points.
5.  **Output Format:** Respond ONLY with a valid JSON object containing a single key "rewritten_markdown". The value associated with this key MUST be a string containing the complete, rewritten resume in Markdown format, starting directly with the '# Full Name' heading.
6.  **Strictness:** Do NOT include any introductory text, explanations, apologies, code block markers (like ```json), or any text whatsoever before or after the single JSON object in your response.

**Markdown Structure Template (for the value of "rewritten_markdown"):**

{markdown_template}

---

**Original Resume Text (Raw):**

{original_content}

{response_marker}"#;

const REVISE_PROMPT_TEMPLATE: &str = r#"You are an expert ATS resume writer and formatter. Your task is to revise the provided resume based on the user's feedback, while maintaining professional ATS formatting and style.

**Core Instructions:**
1.  **Make Requested Changes:** Apply the user's feedback carefully, preserving the overall professional quality.
2.  **Maintain Information:** Preserve ALL original information that the user doesn't ask to change.
3.  **Enhance Wording:** Improve clarity, use strong action verbs, quantify achievements, and ensure professional language.
4.  **ATS Optimization:** Naturally integrate relevant keywords.
5.  **Markdown Structure:** Format the revised resume using the standard Markdown structure provided below. Use '*' for ALL bullet points.
6.  **Output Format:** Respond ONLY with a valid JSON object containing a single key "revised_markdown". The value associated with this key MUST be a string containing the complete, revised resume in Markdown format, starting directly with the '# Full Name' heading.
7.  **Strictness:** Do NOT include any introductory text, explanations, apologies, code block markers (like ```json), or any text whatsoever before or after the single JSON object in your response.

**Markdown Structure Template (for the value of "revised_markdown"):**

{markdown_template}

---

**Current Resume:**
{current_version}

**User Feedback:**
{feedback}

{response_marker}"#;

/// Builds the rewrite prompt for a raw source resume.
pub fn build_rewrite_prompt(original_content: &str) -> String {
    REWRITE_PROMPT_TEMPLATE
        .replace("{markdown_template}", MARKDOWN_TEMPLATE)
        .replace("{original_content}", original_content)
        .replace("{response_marker}", RESPONSE_MARKER)
}

/// Builds the revision prompt from the current version and user feedback.
pub fn build_revise_prompt(current_version: &str, feedback: &str) -> String {
    REVISE_PROMPT_TEMPLATE
        .replace("{markdown_template}", MARKDOWN_TEMPLATE)
        .replace("{current_version}", current_version)
        .replace("{feedback}", feedback)
        .replace("{response_marker}", RESPONSE_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_prompt_embeds_source_and_key() {
        let prompt = build_rewrite_prompt("JOHN SMITH\nSoftware Engineer");
        assert!(prompt.contains("JOHN SMITH\nSoftware Engineer"));
        assert!(prompt.contains("\"rewritten_markdown\""));
        assert!(!prompt.contains("\"revised_markdown\""));
    }

    #[test]
    fn test_revise_prompt_embeds_version_and_feedback() {
        let prompt = build_revise_prompt("# Jane Doe\n## Summary", "Make the summary shorter");
        assert!(prompt.contains("# Jane Doe\n## Summary"));
        assert!(prompt.contains("Make the summary shorter"));
        assert!(prompt.contains("\"revised_markdown\""));
    }

    #[test]
    fn test_prompts_end_with_the_fallback_marker() {
        // The fallback extractor depends on the marker being the final
        // instruction line of both prompts.
        assert!(build_rewrite_prompt("x").trim_end().ends_with(RESPONSE_MARKER));
        assert!(build_revise_prompt("x", "y").trim_end().ends_with(RESPONSE_MARKER));
    }

    #[test]
    fn test_no_placeholder_left_unsubstituted() {
        let prompt = build_rewrite_prompt("source");
        assert!(!prompt.contains("{markdown_template}"));
        assert!(!prompt.contains("{original_content}"));
        assert!(!prompt.contains("{response_marker}"));
    }
}
