//! Recovery of a usable Markdown document from an untrusted model response.
//!
//! The raw response may contain explanatory prose, malformed JSON, truncated
//! output, or nothing usable at all. Recovery runs three strategies in order:
//!
//! 1. Structured: slice the outermost `{...}`, sanitize, parse, read the
//!    mode's key → `ai_success`.
//! 2. Textual: slice after the last prompt marker, accept if it starts like a
//!    Markdown document → `ai_fallback_heuristic`.
//! 3. Placeholder: substitute a fixed well-formed document → `placeholder`.
//!
//! The pipeline never returns "no result": every call yields a non-empty
//! document, so callers can always persist and render something.

use crate::rewrite::prompts::RESPONSE_MARKER;
use crate::rewrite::{RecoveredDocument, RecoveryOutcome, RewriteMode};

/// Appended to every placeholder document so users know the content did not
/// come from the model.
pub const PLACEHOLDER_NOTE: &str =
    "[Note: This is placeholder content because the AI response could not be processed reliably.]";

/// Fully-formed example resume substituted when a rewrite cannot recover any
/// model output. Follows the same section template the prompt requests.
const EXAMPLE_RESUME: &str = r#"# JOHN DOE
New York, NY | (555) 123-4567 | johndoe@email.com | linkedin.com/in/johndoe

## Summary
Results-driven software engineer with 5+ years of experience building scalable web applications. Expertise in React, Node.js, and cloud architecture. Strong problem-solving skills with a focus on delivering high-quality code and excellent user experiences.

## Skills
*   **Programming Languages:** JavaScript, Python, TypeScript, SQL
*   **Frameworks & Libraries:** React, Node.js, Express, Django, Redux, TailwindCSS
*   **Tools & Platforms:** Git, Docker, AWS, CI/CD, Jira, Agile methodologies

## Experience
### SENIOR SOFTWARE ENGINEER
**ABC Tech** | New York, NY | January 2020 – Present
*   Led development of new customer portal that improved user engagement by 35%.
*   Architected microservice infrastructure that reduced deployment time by 40%.
*   Mentored 5 junior developers, conducting code reviews and technical training.

### SOFTWARE ENGINEER
**XYZ Solutions** | Boston, MA | June 2017 – December 2019
*   Developed RESTful APIs for integration with partner platforms, increasing revenue by 20%.
*   Optimized database queries, reducing page load times by 60%.
*   Implemented automated testing suite that increased code coverage from 65% to 92%.

## Education
### MASTER OF SCIENCE IN COMPUTER SCIENCE
**Massachusetts Institute of Technology** | Cambridge, MA | 2017

### BACHELOR OF SCIENCE IN COMPUTER ENGINEERING
**University of California, Berkeley** | Berkeley, CA | 2015"#;

/// Slices the candidate JSON object out of the raw text: first `{` to last
/// `}`, inclusive.
///
/// Deliberately NOT a balanced-brace scan: the cheap heuristic tolerates
/// prose around the object but mis-slices if the document body itself
/// contains an unbalanced brace. That failure lands in the fallback chain,
/// which is the accepted trade-off.
pub fn slice_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end > start {
        Some(&raw[start..=end])
    } else {
        None
    }
}

/// Repairs the two invalid-JSON artifacts models emit most often inside
/// multi-line string values:
///
/// - a literal backslash followed by a raw newline (a "line continuation")
///   becomes the `\n` escape, so the line break survives parsing;
/// - remaining raw ASCII control characters (0x00–0x1F, 0x7F) are stripped,
///   since strict JSON forbids them inside strings.
pub fn sanitize_json_candidate(candidate: &str) -> String {
    let continued = candidate.replace("\\\n", "\\n");
    continued.chars().filter(|c| !c.is_ascii_control()).collect()
}

/// Strips a leading code-fence tag and/or a trailing fence from the text.
fn strip_outer_fences(text: &str) -> &str {
    let mut text = text.trim();
    for tag in ["```json", "```markdown", "```"] {
        if let Some(stripped) = text.strip_prefix(tag) {
            text = stripped.trim_start();
            break;
        }
    }
    if let Some(stripped) = text.strip_suffix("```") {
        text = stripped.trim_end();
    }
    text
}

/// Structured extraction: brace-slice, sanitize, parse, read `key`.
///
/// Returns `None` when no object can be sliced, the sanitized slice does not
/// parse, or the key is missing / not a string. A present-but-empty value is
/// returned as-is; emptiness is resolved by the caller (it routes straight to
/// the placeholder, not to the textual fallback).
pub fn extract_structured(raw: &str, key: &str) -> Option<String> {
    let candidate = slice_json_object(raw)?;
    let sanitized = sanitize_json_candidate(candidate);
    let parsed: serde_json::Value = serde_json::from_str(&sanitized).ok()?;
    let markdown = parsed.get(key)?.as_str()?;
    Some(strip_outer_fences(markdown.trim()).to_string())
}

/// Textual fallback: take everything after the LAST occurrence of the prompt
/// marker and accept it only if it starts like the expected document (a
/// level-1 heading).
pub fn extract_after_marker(raw: &str, marker: &str) -> Option<String> {
    let (_, suffix) = raw.rsplit_once(marker)?;
    let suffix = suffix.trim();
    if !suffix.starts_with('#') {
        return None;
    }
    Some(strip_outer_fences(suffix).to_string())
}

/// Resolves the final document for a rewrite/revise call.
///
/// `raw` is `None` when the inference call itself failed (timeout, non-2xx,
/// transport error, bad envelope); both strategies are then skipped and the
/// placeholder is substituted directly. `prior_version` and `feedback` feed
/// the revision placeholder.
pub fn resolve_document(
    mode: RewriteMode,
    raw: Option<&str>,
    prior_version: Option<&str>,
    feedback: Option<&str>,
) -> RecoveredDocument {
    let recovered = raw.and_then(|raw| {
        extract_structured(raw, mode.response_key())
            .map(|markdown| (RecoveryOutcome::AiSuccess, markdown))
            .or_else(|| {
                extract_after_marker(raw, RESPONSE_MARKER)
                    .map(|markdown| (RecoveryOutcome::AiFallbackHeuristic, markdown))
            })
    });

    match recovered {
        Some((outcome, markdown)) if !markdown.trim().is_empty() => RecoveredDocument {
            outcome,
            markdown,
        },
        _ => RecoveredDocument {
            outcome: RecoveryOutcome::Placeholder,
            markdown: placeholder_document(mode, prior_version, feedback),
        },
    }
}

/// Builds the placeholder document for the given mode. Always non-empty and
/// always carries the explanatory note.
fn placeholder_document(
    mode: RewriteMode,
    prior_version: Option<&str>,
    feedback: Option<&str>,
) -> String {
    match mode {
        RewriteMode::Rewrite => format!("{EXAMPLE_RESUME}\n\n{PLACEHOLDER_NOTE}"),
        RewriteMode::Revise => {
            let prior = prior_version.unwrap_or_default();
            let feedback = feedback.unwrap_or_default();
            format!("{prior}\n\n# REVISION BASED ON FEEDBACK:\n{feedback}\n\n{PLACEHOLDER_NOTE}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "rewritten_markdown";

    #[test]
    fn test_clean_json_with_surrounding_prose_is_ai_success() {
        let raw = r##"Sure, here is the result: {"rewritten_markdown": "# Jane Doe\n## Summary\nEngineer."} hope that helps!"##;
        let doc = resolve_document(RewriteMode::Rewrite, Some(raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::AiSuccess);
        assert_eq!(doc.markdown, "# Jane Doe\n## Summary\nEngineer.");
    }

    #[test]
    fn test_backslash_newline_continuation_is_repaired() {
        // A literal backslash followed by a raw newline inside the string
        // value is invalid JSON; the sanitizer turns it into an \n escape.
        let raw = "{\"rewritten_markdown\": \"# Jane Doe\\nLine1\\\nLine2\"}";
        let doc = resolve_document(RewriteMode::Rewrite, Some(raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::AiSuccess);
        assert_eq!(doc.markdown, "# Jane Doe\nLine1\nLine2");
    }

    #[test]
    fn test_embedded_control_characters_are_stripped() {
        let raw = "{\"rewritten_markdown\": \"# Jane\u{0007} Doe\u{0001}\"}";
        let doc = resolve_document(RewriteMode::Rewrite, Some(raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::AiSuccess);
        assert_eq!(doc.markdown, "# Jane Doe");
    }

    #[test]
    fn test_fenced_value_is_unwrapped() {
        let raw = r#"{"rewritten_markdown": "```markdown\n# Jane Doe\n## Summary\n```"}"#;
        let doc = resolve_document(RewriteMode::Rewrite, Some(raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::AiSuccess);
        assert_eq!(doc.markdown, "# Jane Doe\n## Summary");
    }

    #[test]
    fn test_no_braces_with_marker_uses_textual_fallback() {
        let raw = format!(
            "I could not produce JSON.\n{RESPONSE_MARKER}\n# Jane Doe\n## Summary\nStrong engineer."
        );
        let doc = resolve_document(RewriteMode::Rewrite, Some(&raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::AiFallbackHeuristic);
        assert!(doc.markdown.starts_with("# Jane Doe"));
    }

    #[test]
    fn test_fallback_splits_on_last_marker_occurrence() {
        // The prompt itself contains the marker once; models that echo the
        // prompt produce it twice. Only the text after the LAST one counts.
        let raw = format!(
            "...instructions...{RESPONSE_MARKER}\n(echoed prompt)\n{RESPONSE_MARKER}\n# Jane Doe"
        );
        let doc = resolve_document(RewriteMode::Rewrite, Some(&raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::AiFallbackHeuristic);
        assert_eq!(doc.markdown, "# Jane Doe");
    }

    #[test]
    fn test_missing_key_falls_through_to_marker_fallback() {
        let raw = format!(
            "{{\"wrong_key\": \"# X\"}} {RESPONSE_MARKER}\n# Jane Doe\n## Summary"
        );
        let doc = resolve_document(RewriteMode::Rewrite, Some(&raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::AiFallbackHeuristic);
    }

    #[test]
    fn test_marker_followed_by_non_heading_is_placeholder() {
        let raw = format!("{RESPONSE_MARKER}\nSorry, I cannot help with that.");
        let doc = resolve_document(RewriteMode::Rewrite, Some(&raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::Placeholder);
        assert!(doc.markdown.contains(PLACEHOLDER_NOTE));
    }

    #[test]
    fn test_malformed_json_without_marker_is_placeholder() {
        let raw = "{\"rewritten_markdown\": \"# unterminated";
        let doc = resolve_document(RewriteMode::Rewrite, Some(raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::Placeholder);
        assert!(!doc.markdown.trim().is_empty());
    }

    #[test]
    fn test_transport_failure_is_placeholder() {
        let doc = resolve_document(RewriteMode::Rewrite, None, None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::Placeholder);
        assert!(doc.markdown.contains("# JOHN DOE"));
        assert!(doc.markdown.contains(PLACEHOLDER_NOTE));
    }

    #[test]
    fn test_empty_recovered_value_is_placeholder_not_fallback() {
        // A present-but-empty key parses fine; emptiness routes straight to
        // the placeholder even if a marker is also present.
        let raw = format!("{{\"rewritten_markdown\": \"\"}} {RESPONSE_MARKER}\n# Jane Doe");
        let doc = resolve_document(RewriteMode::Rewrite, Some(&raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::Placeholder);
    }

    #[test]
    fn test_revision_placeholder_keeps_prior_version_and_feedback() {
        let doc = resolve_document(
            RewriteMode::Revise,
            None,
            Some("# Jane Doe\n## Summary\nOld version."),
            Some("Add more metrics to the experience section"),
        );
        assert_eq!(doc.outcome, RecoveryOutcome::Placeholder);
        assert!(doc.markdown.starts_with("# Jane Doe"));
        assert!(doc.markdown.contains("# REVISION BASED ON FEEDBACK:"));
        assert!(doc.markdown.contains("Add more metrics to the experience section"));
        assert!(doc.markdown.contains(PLACEHOLDER_NOTE));
    }

    #[test]
    fn test_revise_mode_reads_its_own_key() {
        let raw = r##"{"revised_markdown": "# Jane Doe\n## Summary\nBetter."}"##;
        let doc = resolve_document(RewriteMode::Revise, Some(raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::AiSuccess);
        assert_eq!(doc.markdown, "# Jane Doe\n## Summary\nBetter.");
    }

    #[test]
    fn test_slice_requires_a_closing_brace_after_the_opening_one() {
        assert!(slice_json_object("} nothing {").is_none());
        assert!(slice_json_object("no braces at all").is_none());
        assert_eq!(slice_json_object("a {\"k\": 1} b"), Some("{\"k\": 1}"));
    }

    #[test]
    fn test_unbalanced_brace_in_body_mis_slices_and_falls_back() {
        // Documented trade-off of the cheap first-{/last-} heuristic: a stray
        // closing brace after the object extends the slice and breaks the
        // parse, landing in the fallback chain.
        let raw = r##"{"rewritten_markdown": "# Jane"} and a stray } here"##;
        let doc = resolve_document(RewriteMode::Rewrite, Some(raw), None, None);
        assert_eq!(doc.outcome, RecoveryOutcome::Placeholder);
    }

    #[test]
    fn test_sanitize_preserves_escaped_newlines() {
        let candidate = r#"{"k": "a\nb"}"#;
        assert_eq!(sanitize_json_candidate(candidate), candidate);
    }

    #[test]
    fn test_extract_structured_ignores_non_string_values() {
        assert!(extract_structured(r#"{"rewritten_markdown": 42}"#, KEY).is_none());
        assert!(extract_structured(r#"{"rewritten_markdown": ["a"]}"#, KEY).is_none());
    }
}
