use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static FENCED_REGION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```[^\n`]*\n?(.*?)```").unwrap());
static STRUCTURED_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*([-*+]|\d+\.)\s").unwrap());
static EXCESS_NEWLINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static ORPHAN_FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`{3,}").unwrap());

/// Unwraps fenced regions whose content is structured text the user should
/// see (lists, Q&A), and deletes regions holding literal code. Leftover fence
/// markers from malformed input are stripped afterwards.
pub fn extract_code_fences(text: &str) -> String {
    let replaced = FENCED_REGION_RE.replace_all(text, |captures: &Captures| {
        let inner = captures.get(1).map_or("", |m| m.as_str());
        if STRUCTURED_LINE_RE.is_match(inner) || inner.contains("Q:") {
            inner.trim().to_string()
        } else {
            String::new()
        }
    });
    let collapsed = collapse_blank_lines(&replaced);
    ORPHAN_FENCE_RE.replace_all(&collapsed, "").to_string()
}

/// Collapses runs of three or more newlines down to a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    EXCESS_NEWLINES_RE.replace_all(text, "\n\n").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_fence_content_is_unwrapped() {
        let output = extract_code_fences("```\n- a\n- b\n```");
        assert!(output.contains("- a"));
        assert!(output.contains("- b"));
        assert!(!output.contains('`'));
    }

    #[test]
    fn qa_fence_content_is_unwrapped() {
        let output = extract_code_fences("```\nQ: what?\nA: that\n```");
        assert_eq!(output, "Q: what?\nA: that");
    }

    #[test]
    fn literal_code_fence_is_dropped() {
        let output = extract_code_fences("before\n```rust\nfn main() {}\n```\nafter");
        assert!(!output.contains("fn main"));
        assert!(!output.contains('`'));
        assert!(output.contains("before"));
        assert!(output.contains("after"));
    }

    #[test]
    fn language_tag_does_not_leak_into_content() {
        let output = extract_code_fences("```markdown\n- kept\n```");
        assert_eq!(output, "- kept");
    }

    #[test]
    fn orphan_fence_markers_are_stripped() {
        assert_eq!(extract_code_fences("text\n````\nmore"), "text\n\nmore");
    }

    #[test]
    fn excess_blank_lines_collapse_to_one() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
    }
}
