//! Line classification.
//!
//! Decides how a single payload line is rendered: as a blank placeholder,
//! as typed plain text, or as a link-bearing line split around its first URL.

use std::sync::LazyLock;

use regex::Regex;

/// First absolute `http(s)://` token in a line, matched case-insensitively.
static LINE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://\S+").expect("valid url pattern"));

/// Bullet markers that start list lines in command output.
const BULLET_MARKERS: &[char] = &['▸', '•'];

/// Rendering strategy for one payload line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// Line without a URL; typed as a single region.
    PlainText,
    /// Line containing a URL; typed as before / link / after regions.
    LinkLine {
        before: &'a str,
        url: &'a str,
        after: &'a str,
    },
}

/// Classifies a line (without its trailing newline).
pub fn classify(line: &str) -> LineKind<'_> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    match LINE_URL.find(line) {
        Some(m) => LineKind::LinkLine {
            before: &line[..m.start()],
            url: m.as_str(),
            after: &line[m.end()..],
        },
        None => LineKind::PlainText,
    }
}

/// Returns true if the line is a list item (`▸ ...` or `• ...`).
pub fn is_bullet(line: &str) -> bool {
    line.trim_start().starts_with(BULLET_MARKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_are_blank() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   \t "), LineKind::Blank);
    }

    #[test]
    fn test_plain_text_without_url() {
        assert_eq!(classify("Backend Development:"), LineKind::PlainText);
        assert_eq!(classify("mail me at me@example.com"), LineKind::PlainText);
        assert_eq!(classify("ftp://not-handled.example"), LineKind::PlainText);
    }

    #[test]
    fn test_link_line_without_after() {
        assert_eq!(
            classify("Website: https://example.com"),
            LineKind::LinkLine {
                before: "Website: ",
                url: "https://example.com",
                after: "",
            }
        );
    }

    #[test]
    fn test_link_line_with_before_and_after() {
        assert_eq!(
            classify("  • GitHub: http://github.com/someone (code)"),
            LineKind::LinkLine {
                before: "  • GitHub: ",
                url: "http://github.com/someone",
                after: " (code)",
            }
        );
    }

    #[test]
    fn test_only_first_url_is_split_out() {
        let LineKind::LinkLine { url, after, .. } =
            classify("https://a.example and https://b.example")
        else {
            panic!("expected link line");
        };
        assert_eq!(url, "https://a.example");
        assert_eq!(after, " and https://b.example");
    }

    #[test]
    fn test_url_match_is_case_insensitive() {
        assert!(matches!(
            classify("HTTPS://EXAMPLE.COM"),
            LineKind::LinkLine { url: "HTTPS://EXAMPLE.COM", .. }
        ));
    }

    #[test]
    fn test_bare_scheme_is_not_a_url() {
        assert_eq!(classify("see https:// for details"), LineKind::PlainText);
    }

    #[test]
    fn test_non_ascii_lines_classify() {
        assert_eq!(classify("🎓 Education:"), LineKind::PlainText);
        assert!(matches!(
            classify("→ https://ex.ample/ü"),
            LineKind::LinkLine { before: "→ ", .. }
        ));
    }

    #[test]
    fn test_bullet_detection() {
        assert!(is_bullet("▸ SmartThing"));
        assert!(is_bullet("  • Python"));
        assert!(!is_bullet("- dash item"));
        assert!(!is_bullet(""));
    }
}
