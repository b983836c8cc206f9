//! Prompt for the resume analysis call.

/// Analysis prompt template. Replace `{resume_text}` before sending.
///
/// Asks for a single JSON object with percentage scores, exactly 10 key
/// insights, and exactly 10 ATS-oriented improvement suggestions.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and return ONLY valid JSON (with no additional text or formatting) that exactly follows the structure below.

The expected JSON structure is:
{
  "scores": {"skills": 0, "experience": 0, "education": 0, "overall": 0},
  "key_insights": ["insight 1", "insight 2", "... exactly 10 insights"],
  "improvement_suggestions": ["suggestion 1", "suggestion 2", "... exactly 10 suggestions"]
}

Scores are percentages (0-100). The key insights and improvement suggestions must cover the following areas, referring to ATS best practices:
- Formatting & Readability
- Grammar & Language
- Contact & Personal Information
- Professional Summary or Objective
- Skills & Competencies
- Experience & Accomplishments
- Education & Certifications
- Keywords & ATS Optimization
- Achievements & Awards
- Projects & Publications (if applicable)
- Overall Relevance & Customization
- Consistency & Accuracy
- Professional Tone & Branding
- Red Flags & Gaps
- Recommended jobs to consider based on this CV

Resume:
{resume_text}"#;

pub fn build_analysis_prompt(resume_text: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
