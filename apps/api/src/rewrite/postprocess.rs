//! Deterministic cleanup applied to every recovered document before it is
//! persisted or rendered. Each rule is a cheap regex/string pass; the whole
//! pipeline is idempotent, so feeding an already-clean document through it is
//! a no-op.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_FENCES: Lazy<Regex> = Lazy::new(|| Regex::new(r"```[A-Za-z]*\n?").unwrap());
static RE_EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static RE_BULLETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^[ \t]*[*-][ \t]+").unwrap());

/// Normalizes recovered Markdown:
///
/// 1. remove stray triple-backtick fences anywhere in the text
/// 2. collapse runs of 3+ newlines down to exactly 2
/// 3. normalize bullet markers at line starts to `* `
pub fn normalize_markdown(input: &str) -> String {
    let without_fences = RE_FENCES.replace_all(input, "");
    let collapsed = RE_EXCESS_NEWLINES.replace_all(&without_fences, "\n\n");
    let bullets = RE_BULLETS.replace_all(&collapsed, "* ");
    bullets.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_document_is_untouched() {
        let input = "# Jane Doe\n\n## Summary\nEngineer.\n\n## Skills\n* **Languages:** Rust";
        assert_eq!(normalize_markdown(input), input);
    }

    #[test]
    fn test_idempotent_on_messy_input() {
        let input = "```markdown\n# Jane Doe\n\n\n\n## Skills\n  -   Rust\n```";
        let once = normalize_markdown(input);
        let twice = normalize_markdown(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fences_are_removed_anywhere() {
        let input = "# Jane\n```json\ncontent\n```\nmore";
        let result = normalize_markdown(input);
        assert!(!result.contains("```"));
        assert!(result.contains("content"));
    }

    #[test]
    fn test_newline_runs_collapse_to_exactly_two() {
        let result = normalize_markdown("# A\n\n\n\n\n## B");
        assert_eq!(result, "# A\n\n## B");
    }

    #[test]
    fn test_bullet_markers_are_normalized() {
        let result = normalize_markdown("## Skills\n  *   Rust\n\t- Python\n*  SQL");
        assert_eq!(result, "## Skills\n* Rust\n* Python\n* SQL");
    }

    #[test]
    fn test_bold_and_italic_markers_are_not_bullets() {
        let input = "**ABC Tech** | New York\n*emphasis* text";
        assert_eq!(normalize_markdown(input), input);
    }

    #[test]
    fn test_horizontal_rule_is_preserved() {
        let input = "# A\n\n---\n\n# B";
        assert_eq!(normalize_markdown(input), input);
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        assert_eq!(normalize_markdown("\n\n# Jane\n\n"), "# Jane");
    }
}
