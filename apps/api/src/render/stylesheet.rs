//! The fixed stylesheet shipped with every render request. Tuned for a
//! single-column US-letter resume; job and education entries avoid page
//! breaks inside an entry.

pub const RESUME_STYLESHEET: &str = r#"
@page {
    size: letter;
    margin: 0.75in;
}

body {
    font-family: "Helvetica", "Arial", sans-serif;
    font-size: 10pt;
    line-height: 1.4;
    color: #333;
}

h1, h2, h3, h4, h5, h6 {
    font-weight: bold;
    color: #000;
    margin-top: 1.2em;
    margin-bottom: 0.6em;
    page-break-after: avoid;
}

h1 {
    font-size: 18pt;
    margin-top: 0;
    text-align: center;
}

h2 {
    font-size: 14pt;
    border-bottom: 1px solid #eee;
    padding-bottom: 3pt;
}

h3 {
    font-size: 11pt;
}

p {
    margin-top: 0;
    margin-bottom: 0.8em;
    orphans: 3;
    widows: 3;
}

ul, ol {
    padding-left: 20pt;
    margin-top: 0.5em;
    margin-bottom: 0.8em;
}

li {
    margin-bottom: 0.4em;
}

.job-entry, .education-entry, .project-entry {
    page-break-inside: avoid;
    margin-bottom: 1.5em;
}

strong, b {
    font-weight: bold;
}

em, i {
    font-style: italic;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stylesheet_targets_letter_pages() {
        assert!(RESUME_STYLESHEET.contains("size: letter"));
        assert!(RESUME_STYLESHEET.contains("page-break-inside: avoid"));
    }
}
